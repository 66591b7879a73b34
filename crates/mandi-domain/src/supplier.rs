//! Supplier module - first-class supplier records

use crate::category::Category;
use crate::location::{Located, Location};
use crate::trust::{trust_score, TrustTier};
use std::fmt;

/// Identifier of a supplier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SupplierId(String);

impl SupplierId {
    /// Generate a new UUIDv7-based SupplierId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SupplierId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for SupplierId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SupplierId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dedup key for supplier names: trimmed and lower-cased
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A supplier known to the marketplace
///
/// Created from seed data or promoted from repeated detections. The name is
/// the dedup key (case-insensitive).
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    /// Unique identifier
    pub id: SupplierId,

    /// Canonical display name
    pub name: String,

    /// Category of goods, if known
    pub category: Option<Category>,

    /// Active up-votes
    pub thumbs_up: u32,

    /// Active down-votes
    pub thumbs_down: u32,

    /// Whether the record is backed by a confident detection or manual check
    pub is_verified: bool,

    /// Where the supplier operates
    pub location: Location,
}

impl Supplier {
    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }

    /// Trust percentage from the supplier's votes (75 when unvoted)
    pub fn trust_score(&self) -> u8 {
        trust_score(self.thumbs_up, self.thumbs_down)
    }

    /// Qualitative trust bucket for display
    pub fn trust_tier(&self) -> TrustTier {
        TrustTier::from_score(self.trust_score())
    }
}

impl Located for Supplier {
    fn location(&self) -> &Location {
        &self.location
    }
}

/// Filter criteria for supplier listings
#[derive(Debug, Clone, Default)]
pub struct SupplierQuery {
    /// Only suppliers in this category
    pub category: Option<Category>,

    /// Case-insensitive substring matched against name or category
    pub text: Option<String>,
}

impl SupplierQuery {
    /// Whether a supplier passes this filter
    pub fn matches(&self, supplier: &Supplier) -> bool {
        if let Some(category) = self.category {
            if supplier.category != Some(category) {
                return false;
            }
        }

        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                supplier.name.to_lowercase().contains(&needle)
                    || supplier
                        .category
                        .is_some_and(|c| c.as_str().contains(&needle))
            }
        }
    }

    /// Apply the filter, keeping the input order
    pub fn apply<'a>(&self, suppliers: &'a [Supplier]) -> Vec<&'a Supplier> {
        suppliers.iter().filter(|s| self.matches(s)).collect()
    }
}
