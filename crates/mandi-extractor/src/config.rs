//! Configuration for the Extractor
//!
//! The brand dictionary and every pattern table are plain data so rule sets
//! can be swapped or extended (other languages, new categories) without
//! touching the detection logic.

use mandi_domain::{Category, DetectionTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A capitalized span of one or more words, optionally joined by "&"
const NAME: &str = r"[A-Z][A-Za-z'&]*(?:(?:\s+&)?\s+[A-Z][A-Za-z'&]*)*";

/// Business-entity suffixes that close a direct-pattern name
const SUFFIX: &str =
    r"(?i:farms?|distributors?|palace|world|co|ltd|inc|corp|company|store|market|shop)";

/// Confidence assigned to each detection tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    /// Known-brand dictionary hit
    pub brand: f64,
    /// Direct linguistic pattern
    pub direct: f64,
    /// Category-scoped pattern
    pub category: f64,
    /// Location-based fallback
    pub location: f64,
}

impl TierWeights {
    /// Weight for a tier
    pub fn weight(&self, tier: DetectionTier) -> f64 {
        match tier {
            DetectionTier::Brand => self.brand,
            DetectionTier::Direct => self.direct,
            DetectionTier::Category => self.category,
            DetectionTier::Location => self.location,
        }
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            brand: 0.8,
            direct: 0.9,
            category: 0.6,
            location: 0.4,
        }
    }
}

/// Configuration for the Extractor
///
/// Patterns use `regex` crate syntax. Brand, direct and category patterns
/// must capture the supplier in a group named `name`; location patterns
/// capture the place in a group named `location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Detections below this confidence are dropped
    pub min_confidence: f64,

    /// Candidates shorter than this (in characters) are dropped; for
    /// location matches the captured place is measured
    pub min_name_length: usize,

    /// Candidates equal to one of these words (case-insensitive) are dropped
    pub stop_words: Vec<String>,

    /// Known supplier and brand names, matched as case-insensitive substrings
    pub brands: Vec<String>,

    /// Direct linguistic patterns, tried in order
    pub direct_patterns: Vec<String>,

    /// Location fallback patterns; the default only accepts a capitalized
    /// place ("near Azadpur market", not "near azadpur market")
    pub location_patterns: Vec<String>,

    /// Word appended to a location to synthesize a supplier name
    pub location_name_suffix: String,

    /// Patterns for the live-input hint, applied to lower-cased text
    pub hint_patterns: Vec<String>,

    /// Confidence per tier
    pub weights: TierWeights,

    /// Patterns scoped to a category, keyed by category name
    pub category_patterns: BTreeMap<String, Vec<String>>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for tier in DetectionTier::ALL {
            let weight = self.weights.weight(tier);
            if !(0.0..=1.0).contains(&weight) {
                return Err(format!(
                    "weight for {} must be in [0.0, 1.0], got {}",
                    tier.as_str(),
                    weight
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence must be in [0.0, 1.0], got {}",
                self.min_confidence
            ));
        }
        if self.min_name_length == 0 {
            return Err("min_name_length must be greater than 0".to_string());
        }
        if self.location_name_suffix.trim().is_empty() {
            return Err("location_name_suffix cannot be empty".to_string());
        }
        for key in self.category_patterns.keys() {
            if Category::parse(key).is_none() {
                return Err(format!("unknown category in category_patterns: {}", key));
            }
        }
        Ok(())
    }

    /// Category patterns for one category (empty when none are configured)
    pub fn patterns_for(&self, category: Category) -> &[String] {
        self.category_patterns
            .iter()
            .find(|(key, _)| Category::parse(key) == Some(category))
            .map(|(_, patterns)| patterns.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for ExtractorConfig {
    /// Default English rule table
    fn default() -> Self {
        Self {
            weights: TierWeights::default(),
            min_confidence: 0.4,
            min_name_length: 3,
            stop_words: default_stop_words(),
            brands: default_brands(),
            direct_patterns: default_direct_patterns(),
            category_patterns: default_category_patterns(),
            location_patterns: vec![format!(
                r"(?i:\b(?:in|at|near))\s+(?P<location>{NAME})\s+(?i:market|store|shop|farms?)\b"
            )],
            location_name_suffix: "Market".to_string(),
            hint_patterns: default_hint_patterns(),
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: only brand, direct and category hits are reported
    pub fn strict() -> Self {
        Self {
            min_confidence: 0.6,
            ..Self::default()
        }
    }

    /// Lenient preset: two-letter names are accepted
    pub fn lenient() -> Self {
        Self {
            min_name_length: 2,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

fn default_stop_words() -> Vec<String> {
    ["the", "good", "bad", "quality", "fresh", "old", "new", "local", "nearby"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_brands() -> Vec<String> {
    [
        "Green Valley Farms",
        "City Distributors",
        "Spice Palace",
        "EcoWrap",
        "Spice World",
        "MilkCo",
        "Local Market",
        "Organic Valley",
        "Fresh Farms",
        "Quality Foods",
        "Premium Spices",
        "Natural Oils",
        "Eco Packaging",
        "Trusted Suppliers",
        "Verified Vendors",
        "Quality Distributors",
        "Fresh Market",
        "Organic Palace",
        "Premium Farms",
        "Natural World",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_direct_patterns() -> Vec<String> {
    let mut patterns: Vec<String> = ["from", "at", "by"]
        .iter()
        .map(|prep| format!(r"(?i:\b{prep})\s+(?P<name>{NAME}\s+{SUFFIX})\b"))
        .collect();
    patterns.extend(
        ["supplier", "vendor"]
            .iter()
            .map(|word| format!(r"(?i:\b{word})\s+(?P<name>{NAME})")),
    );
    patterns
}

fn default_category_patterns() -> BTreeMap<String, Vec<String>> {
    // "<goods> from|at|by NAME" for each category
    let sourced = |goods: &str| {
        format!(r"(?i:\b(?:{goods}))\s+(?i:from|at|by)\s+(?P<name>{NAME})")
    };
    // "NAME <kind> <entity>" for each category
    let titled = |kind: &str, entity: &str| {
        format!(r"(?P<name>{NAME}\s+(?i:{kind})\s+(?i:{entity}))\b")
    };

    let mut table = BTreeMap::new();
    table.insert(
        Category::Vegetables.as_str().to_string(),
        vec![
            format!(
                r"(?i:\b(?:fresh|organic))\s+[A-Za-z\s]+?\s+(?i:from|at|by)\s+(?P<name>{NAME})"
            ),
            format!(r"(?P<name>{NAME}\s+(?i:farms?|growers?))\s+(?i:for|with)\b"),
        ],
    );
    table.insert(
        Category::Spices.as_str().to_string(),
        vec![
            sourced("spices?|turmeric|pepper|cardamom"),
            titled("spice|seasoning", "company|store"),
        ],
    );
    table.insert(
        Category::Oil.as_str().to_string(),
        vec![
            sourced("oil|sunflower|mustard|olive"),
            titled("oil|refinery", "company|distributors"),
        ],
    );
    table.insert(
        Category::Packaging.as_str().to_string(),
        vec![
            sourced("bags?|packaging|wraps?"),
            titled("packaging|wrapping", "company|solutions"),
        ],
    );
    table.insert(
        Category::Dairy.as_str().to_string(),
        vec![
            sourced("milk|dairy|cheese|yogurt"),
            titled("dairy|milk", "company|farm"),
        ],
    );
    table
}

fn default_hint_patterns() -> Vec<String> {
    [
        r"(?:from|bought from|purchased from|supplier|vendor)\s+(?P<name>[a-z\s]+?)(?:\s|$|[.,!?])",
        r"(?P<name>[a-z\s]+?)\s+(?:farms?|distributors?|traders?|suppliers?|enterprises?|company|co\.?|ltd\.?|pvt\.?)",
        r"^(?P<name>[a-z\s]+?)\s+(?:delivered|supplied|provided|gave)",
        r"(?:at|from)\s+(?P<name>[a-z\s]+?)\s+(?:market|shop|store|outlet)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weights.weight(DetectionTier::Brand), 0.8);
        assert_eq!(config.weights.weight(DetectionTier::Direct), 0.9);
        assert_eq!(config.weights.weight(DetectionTier::Category), 0.6);
        assert_eq!(config.weights.weight(DetectionTier::Location), 0.4);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::strict().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
        assert_eq!(ExtractorConfig::strict().min_confidence, 0.6);
        assert_eq!(ExtractorConfig::lenient().min_name_length, 2);
    }

    #[test]
    fn test_meat_has_no_category_patterns() {
        let config = ExtractorConfig::default();
        assert!(config.patterns_for(Category::Meat).is_empty());
        assert_eq!(config.patterns_for(Category::Dairy).len(), 2);
    }

    #[test]
    fn test_invalid_weight() {
        let mut config = ExtractorConfig::default();
        config.weights.direct = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_category_key() {
        let mut config = ExtractorConfig::default();
        config
            .category_patterns
            .insert("electronics".to_string(), vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.brands, parsed.brands);
        assert_eq!(config.direct_patterns, parsed.direct_patterns);
        assert_eq!(config.weights, parsed.weights);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed = ExtractorConfig::from_toml(
            r#"
            min_confidence = 0.6
            brands = ["Sharma Traders"]
            "#,
        )
        .unwrap();

        assert_eq!(parsed.min_confidence, 0.6);
        assert_eq!(parsed.brands, vec!["Sharma Traders".to_string()]);
        assert_eq!(parsed.stop_words.len(), 9);
        assert_eq!(parsed.weights, TierWeights::default());
    }
}
