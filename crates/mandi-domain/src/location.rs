//! Geographic location attached to posts and suppliers

/// A point on the map plus the human-readable labels shown next to it
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,

    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,

    /// Street address or landmark
    pub address: String,

    /// Neighbourhood or locality
    pub area: String,

    /// City name
    pub city: String,
}

impl Location {
    /// Create a location from coordinates and labels
    pub fn new(
        latitude: f64,
        longitude: f64,
        address: impl Into<String>,
        area: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
            area: area.into(),
            city: city.into(),
        }
    }

    /// Create a location with coordinates only and empty labels
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, "", "", "")
    }

    /// Whether the coordinates are finite and inside the valid lat/lon ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Label used in listings, e.g. "Karol Bagh, Delhi"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.area, self.city)
    }
}

/// Anything that sits at a location and can be ranked by proximity
pub trait Located {
    /// The item's location
    fn location(&self) -> &Location;
}

impl Located for Location {
    fn location(&self) -> &Location {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let loc = Location::new(28.65, 77.25, "Karol Bagh", "Karol Bagh", "Delhi");
        assert_eq!(loc.display_name(), "Karol Bagh, Delhi");
    }

    #[test]
    fn test_validity() {
        assert!(Location::at(28.6, 77.2).is_valid());
        assert!(Location::at(-90.0, 180.0).is_valid());
        assert!(!Location::at(91.0, 0.0).is_valid());
        assert!(!Location::at(0.0, -180.5).is_valid());
        assert!(!Location::at(f64::NAN, 0.0).is_valid());
    }
}
