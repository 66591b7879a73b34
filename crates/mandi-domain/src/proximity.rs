//! Proximity - great-circle distance and nearest-first ordering

use crate::location::{Located, Location};
use std::cmp::Ordering;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two locations, in kilometres
///
/// Invalid input (NaN or out-of-range coordinates) yields NaN so callers can
/// spot bad location data instead of getting a plausible-looking number.
///
/// # Examples
///
/// ```
/// use mandi_domain::{distance_km, Location};
///
/// let cp = Location::at(28.6129, 77.2295);
/// assert_eq!(distance_km(&cp, &cp), 0.0);
/// assert!(distance_km(&cp, &Location::at(95.0, 0.0)).is_nan());
/// ```
pub fn distance_km(a: &Location, b: &Location) -> f64 {
    if !a.is_valid() || !b.is_valid() {
        return f64::NAN;
    }

    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// An item paired with its distance from the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct Nearby<T> {
    /// The ranked item
    pub item: T,

    /// Distance from the origin in kilometres (NaN for bad coordinates)
    pub distance_km: f64,
}

/// Order items nearest-first relative to `origin`
///
/// The sort is stable: items at equal distance keep their input order.
/// Items whose distance is NaN go last, also in input order.
pub fn sort_by_proximity<T, I>(origin: &Location, items: I) -> Vec<Nearby<T>>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let mut ranked: Vec<Nearby<T>> = items
        .into_iter()
        .map(|item| {
            let distance_km = distance_km(origin, item.location());
            Nearby { item, distance_km }
        })
        .collect();

    ranked.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    ranked
}

fn compare_distance(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}
