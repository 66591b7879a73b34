//! JSON input accepted by `mandi import`, and conversions into domain values.

use crate::error::{CliError, Result};
use mandi_domain::traits::SupplierDetector;
use mandi_domain::{Author, Category, Location, Post, PostId, Supplier, SupplierId, UserId};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Contents of an import file.
///
/// ```json
/// {
///   "suppliers": [{ "name": "Spice Palace", "category": "spices", "thumbs_up": 40 }],
///   "posts": [{ "content": "Got tomatoes from Green Valley Farms", "author": "Rajesh" }]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ImportBundle {
    #[serde(default)]
    pub posts: Vec<PostInput>,
    #[serde(default)]
    pub suppliers: Vec<SupplierInput>,
}

/// A post as written in an import file.
#[derive(Debug, Deserialize)]
pub struct PostInput {
    /// Kept when given, generated otherwise
    #[serde(default)]
    pub id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    pub author: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default)]
    pub comments: u32,
    /// Seconds since the Unix epoch; import time when absent
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub location: Option<LocationInput>,
}

/// A supplier as written in an import file.
#[derive(Debug, Deserialize)]
pub struct SupplierInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbs_up: u32,
    #[serde(default)]
    pub thumbs_down: u32,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub location: Option<LocationInput>,
}

#[derive(Debug, Deserialize)]
pub struct LocationInput {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub city: String,
}

impl From<LocationInput> for Location {
    fn from(input: LocationInput) -> Self {
        Location::new(
            input.latitude,
            input.longitude,
            input.address,
            input.area,
            input.city,
        )
    }
}

impl ImportBundle {
    /// Parse an import file.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.suppliers.is_empty()
    }
}

impl PostInput {
    /// Build a post, filling gaps from `home` and the clock and recording
    /// the supplier `detector` finds in the content.
    pub fn into_post<D: SupplierDetector>(self, detector: &D, home: &Location) -> Result<Post> {
        let content = non_empty(&self.content, "post content")?;
        let author = non_empty(&self.author, "post author")?;
        let user_id = self
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(UserId::new)
            .unwrap_or_else(|| user_id_for(&author));
        let location = self.location.map(Location::from).unwrap_or_else(|| home.clone());

        let post = Post::new(
            self.id.map(PostId::from).unwrap_or_default(),
            content,
            lenient_category(self.category.as_deref()),
            Author {
                name: author,
                id: user_id,
            },
            self.created_at.unwrap_or_else(now),
            location,
        )
        .with_votes(self.likes, self.dislikes);

        Ok(Post {
            comments: self.comments,
            ..with_detected_supplier(post, detector)
        })
    }
}

impl SupplierInput {
    /// Build a supplier; suppliers without a location sit at `home`.
    pub fn into_supplier(self, home: &Location) -> Result<Supplier> {
        Ok(Supplier {
            id: self.id.map(SupplierId::from).unwrap_or_default(),
            name: non_empty(&self.name, "supplier name")?,
            category: lenient_category(self.category.as_deref()),
            thumbs_up: self.thumbs_up,
            thumbs_down: self.thumbs_down,
            is_verified: self.is_verified,
            location: self.location.map(Location::from).unwrap_or_else(|| home.clone()),
        })
    }
}

/// Record the detected supplier name on a post.
pub fn with_detected_supplier<D: SupplierDetector>(post: Post, detector: &D) -> Post {
    let supplier_name = detector.detect(&post).map(|d| d.name);
    Post {
        supplier_name,
        ..post
    }
}

/// Category of a submitted post; unrecognised names become `None`.
pub fn lenient_category(raw: Option<&str>) -> Option<Category> {
    let raw = raw.map(str::trim).filter(|c| !c.is_empty())?;
    let category = Category::parse(raw);
    if category.is_none() {
        warn!("Unknown category '{}', storing without one", raw);
    }
    category
}

/// Category used as a filter; unrecognised names are an error.
pub fn category_filter(raw: Option<&str>) -> Result<Option<Category>> {
    match raw.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(None),
        Some(name) => Category::parse(name).map(Some).ok_or_else(|| {
            let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
            CliError::InvalidInput(format!(
                "Unknown category '{}'. Expected one of: {}",
                name,
                known.join(", ")
            ))
        }),
    }
}

/// Identity derived from a display name: "Rajesh Kumar" becomes "rajesh-kumar".
pub fn user_id_for(name: &str) -> UserId {
    UserId::new(
        name.split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-"),
    )
}

/// Origin for proximity ordering: explicit coordinates, else home.
pub fn origin(lat: Option<f64>, lon: Option<f64>, home: &Location) -> Location {
    match (lat, lon) {
        (Some(latitude), Some(longitude)) => Location::at(latitude, longitude),
        _ => home.clone(),
    }
}

/// Current time in seconds since the Unix epoch.
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn non_empty(value: &str, what: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(value.to_string())
}
