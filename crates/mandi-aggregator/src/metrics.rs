//! Metrics collection for Aggregator operations

use mandi_domain::DetectionTier;
use std::collections::HashMap;

/// Metrics collected during Aggregator passes
///
/// Tracks posts scanned, detections per tier and what happened to every
/// distinct candidate name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatorMetrics {
    /// Detections per tier
    pub detections: HashMap<DetectionTier, usize>,

    /// Posts fed through the detector
    pub posts_scanned: usize,

    /// Suppliers written to the store
    pub promoted: usize,

    /// Candidate names already present in the roster
    pub skipped_existing: usize,

    /// Candidate names without enough corroboration
    pub below_threshold: usize,

    /// Total scan passes completed
    pub scan_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl AggregatorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one detection
    pub fn record_detection(&mut self, tier: DetectionTier) {
        *self.detections.entry(tier).or_insert(0) += 1;
    }

    /// Record posts fed through the detector
    pub fn record_posts(&mut self, count: usize) {
        self.posts_scanned += count;
    }

    /// Record a supplier written to the store
    pub fn record_promotion(&mut self) {
        self.promoted += 1;
    }

    /// Record a candidate skipped because the name already exists
    pub fn record_skipped_existing(&mut self) {
        self.skipped_existing += 1;
    }

    /// Record a candidate left below the corroboration threshold
    pub fn record_below_threshold(&mut self) {
        self.below_threshold += 1;
    }

    /// Record a scan pass completion
    pub fn record_scan(&mut self) {
        self.scan_count += 1;
    }

    /// Get total detections across all tiers
    pub fn total_detections(&self) -> usize {
        self.detections.values().sum()
    }

    /// Fold another set of metrics into this one
    pub fn merge(&mut self, other: &AggregatorMetrics) {
        for (tier, count) in &other.detections {
            *self.detections.entry(*tier).or_insert(0) += count;
        }
        self.posts_scanned += other.posts_scanned;
        self.promoted += other.promoted;
        self.skipped_existing += other.skipped_existing;
        self.below_threshold += other.below_threshold;
        self.scan_count += other.scan_count;
        self.total_runtime_ms += other.total_runtime_ms;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Aggregator Metrics Summary".to_string(),
            "==========================".to_string(),
            format!("Scan passes: {}", self.scan_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            format!("Posts scanned: {}", self.posts_scanned),
            String::new(),
        ];

        if !self.detections.is_empty() {
            lines.push("Detections by tier:".to_string());
            for tier in DetectionTier::ALL {
                if let Some(count) = self.detections.get(&tier) {
                    lines.push(format!("  {}: {}", tier.as_str(), count));
                }
            }
            lines.push(format!("  Total: {}", self.total_detections()));
            lines.push(String::new());
        }

        lines.push(format!("Promoted: {}", self.promoted));
        lines.push(format!("Already known: {}", self.skipped_existing));
        lines.push(format!("Below threshold: {}", self.below_threshold));

        lines.join("\n")
    }
}
