//! Detection module - transient supplier candidates inferred from post text

use crate::category::Category;

/// One of the four ordered detection strategies
///
/// Declaration order is precedence order: when two tiers produce the same
/// confidence, the earlier tier wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DetectionTier {
    /// Case-insensitive match against the known-brand dictionary
    Brand,

    /// Linguistic pattern such as "from X Farms" or "vendor X"
    Direct,

    /// Pattern scoped to the post's own category
    Category,

    /// "near X market" style fallback, synthesizing "X Market"
    Location,
}

impl DetectionTier {
    /// Every tier, in precedence order
    pub const ALL: [DetectionTier; 4] = [
        DetectionTier::Brand,
        DetectionTier::Direct,
        DetectionTier::Category,
        DetectionTier::Location,
    ];

    /// Source tag recorded on detections
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionTier::Brand => "brand_match",
            DetectionTier::Direct => "direct_pattern",
            DetectionTier::Category => "category_pattern",
            DetectionTier::Location => "location_based",
        }
    }

    /// Parse a source tag
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "brand_match" => Some(DetectionTier::Brand),
            "direct_pattern" => Some(DetectionTier::Direct),
            "category_pattern" => Some(DetectionTier::Category),
            "location_based" => Some(DetectionTier::Location),
            _ => None,
        }
    }
}

/// A supplier candidate produced for one post
///
/// Never persisted on its own; the aggregator consumes it immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedSupplier {
    /// Candidate name, title-cased
    pub name: String,

    /// Confidence in [0.0, 1.0], fixed by the tier that matched
    pub confidence: f64,

    /// Category of the post it came from
    pub category: Option<Category>,

    /// Which tier produced it
    pub source: DetectionTier,

    /// Location label when the tier could infer one
    pub location: Option<String>,
}

impl DetectedSupplier {
    /// Dedup key for grouping detections across posts
    pub fn key(&self) -> String {
        crate::supplier::name_key(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(DetectionTier::Brand < DetectionTier::Direct);
        assert!(DetectionTier::Direct < DetectionTier::Category);
        assert!(DetectionTier::Category < DetectionTier::Location);
    }

    #[test]
    fn test_source_tags_round_trip() {
        for tier in DetectionTier::ALL {
            assert_eq!(DetectionTier::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(DetectionTier::parse("guess"), None);
    }

    #[test]
    fn test_key_ignores_case() {
        let detected = DetectedSupplier {
            name: "Green Valley Farms".to_string(),
            confidence: 0.8,
            category: Some(Category::Vegetables),
            source: DetectionTier::Brand,
            location: None,
        };
        assert_eq!(detected.key(), "green valley farms");
    }
}
