//! Configuration for Aggregator operations
//!
//! Defines the promotion thresholds, the fallback location given to promoted
//! suppliers and the re-scan interval.

use mandi_domain::Location;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where a promoted supplier is placed when the text gives no location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackLocation {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Area label used when the detection carries none
    pub area: String,

    /// City label
    pub city: String,
}

impl FallbackLocation {
    /// Build a supplier location, preferring a detected area label
    pub fn to_location(&self, detected_area: Option<&str>) -> Location {
        let area = detected_area
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(self.area.as_str());
        Location::new(self.latitude, self.longitude, area, area, &self.city)
    }
}

impl Default for FallbackLocation {
    /// Central Delhi
    fn default() -> Self {
        Self {
            latitude: 28.6129,
            longitude: 77.2295,
            area: "Delhi".to_string(),
            city: "Delhi".to_string(),
        }
    }
}

/// Configuration for the Aggregator
///
/// # Examples
///
/// ```
/// use mandi_aggregator::AggregatorConfig;
///
/// let config = AggregatorConfig::default();
/// assert_eq!(config.min_corroborating_posts, 2);
///
/// // Strict: three confident posts before promotion
/// let config = AggregatorConfig::strict();
/// assert_eq!(config.min_corroborating_posts, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Detections at or above this confidence count as corroboration
    /// Default: 0.6
    pub corroboration_confidence: f64,

    /// Distinct corroborating posts required before a name is promoted
    /// Default: 2
    pub min_corroborating_posts: usize,

    /// Promoted suppliers are marked verified when the representative
    /// detection reaches this confidence
    /// Default: 0.7
    pub verification_confidence: f64,

    /// How often the background worker re-scans the corpus (in seconds)
    /// Default: 300
    pub scan_interval_secs: u64,

    /// Dry-run mode: log what would be promoted without writing
    /// Default: false
    pub dry_run: bool,

    /// Location given to promoted suppliers
    pub fallback_location: FallbackLocation,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            corroboration_confidence: 0.6,
            min_corroborating_posts: 2,
            verification_confidence: 0.7,
            scan_interval_secs: 300,
            dry_run: false,
            fallback_location: FallbackLocation::default(),
        }
    }
}

impl AggregatorConfig {
    /// Strict promotion: more agreement, higher bar for verification
    pub fn strict() -> Self {
        Self {
            corroboration_confidence: 0.8,
            min_corroborating_posts: 3,
            verification_confidence: 0.9,
            ..Self::default()
        }
    }

    /// Lenient promotion: location-only mentions count, one post is enough
    pub fn lenient() -> Self {
        Self {
            corroboration_confidence: 0.4,
            min_corroborating_posts: 1,
            scan_interval_secs: 60,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.corroboration_confidence) {
            return Err(format!(
                "corroboration_confidence must be in [0.0, 1.0], got {}",
                self.corroboration_confidence
            ));
        }
        if !(0.0..=1.0).contains(&self.verification_confidence) {
            return Err(format!(
                "verification_confidence must be in [0.0, 1.0], got {}",
                self.verification_confidence
            ));
        }
        if self.min_corroborating_posts == 0 {
            return Err("min_corroborating_posts must be greater than 0".to_string());
        }
        if self.scan_interval_secs == 0 {
            return Err("scan_interval_secs must be greater than 0".to_string());
        }
        if !self.fallback_location.to_location(None).is_valid() {
            return Err(format!(
                "fallback_location has invalid coordinates ({}, {})",
                self.fallback_location.latitude, self.fallback_location.longitude
            ));
        }
        Ok(())
    }

    /// Get scan interval as Duration
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AggregatorConfig::default();
        assert_eq!(config.corroboration_confidence, 0.6);
        assert_eq!(config.min_corroborating_posts, 2);
        assert_eq!(config.verification_confidence, 0.7);
        assert_eq!(config.scan_interval_secs, 300);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let strict = AggregatorConfig::strict();
        let lenient = AggregatorConfig::lenient();

        assert!(strict.validate().is_ok());
        assert!(lenient.validate().is_ok());
        assert!(strict.min_corroborating_posts > AggregatorConfig::default().min_corroborating_posts);
        assert!(lenient.corroboration_confidence < AggregatorConfig::default().corroboration_confidence);
    }

    #[test]
    fn test_invalid_configs() {
        let config = AggregatorConfig {
            min_corroborating_posts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AggregatorConfig {
            scan_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = AggregatorConfig::default();
        config.fallback_location.latitude = 120.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fallback_location() {
        let fallback = FallbackLocation::default();

        let location = fallback.to_location(None);
        assert_eq!(location.latitude, 28.6129);
        assert_eq!(location.longitude, 77.2295);
        assert_eq!(location.area, "Delhi");
        assert_eq!(location.city, "Delhi");

        let location = fallback.to_location(Some("Azadpur"));
        assert_eq!(location.area, "Azadpur");
        assert_eq!(location.address, "Azadpur");
        assert_eq!(location.city, "Delhi");
    }

    #[test]
    fn test_duration_conversion() {
        let config = AggregatorConfig::default();
        assert_eq!(config.scan_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AggregatorConfig::strict();
        let parsed = AggregatorConfig::from_toml(&config.to_toml().unwrap()).unwrap();

        assert_eq!(parsed.min_corroborating_posts, 3);
        assert_eq!(parsed.fallback_location, config.fallback_location);
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let config = AggregatorConfig::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: AggregatorConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(config.corroboration_confidence, deserialized.corroboration_confidence);
        assert_eq!(config.dry_run, deserialized.dry_run);
    }
}
