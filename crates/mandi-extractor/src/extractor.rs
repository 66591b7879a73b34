//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::normalize::{title_case, CandidateFilter};
use crate::rules::{compile, RuleSet, NAME_GROUP};
use mandi_domain::traits::SupplierDetector;
use mandi_domain::{Category, DetectedSupplier, Post};
use regex::Regex;
use tracing::debug;

/// Infers supplier names from post text
///
/// Detection is a pure function of a post's content and category. Each
/// applicable rule contributes its first acceptable match; the highest
/// confidence wins and earlier tiers win ties.
#[derive(Debug, Clone)]
pub struct SupplierExtractor {
    config: ExtractorConfig,
    rules: RuleSet,
    hints: Vec<Regex>,
    filter: CandidateFilter,
}

impl SupplierExtractor {
    /// Create an extractor, compiling the rule table from `config`
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        let rules = RuleSet::compile(&config)?;
        Self::with_rules(config, rules)
    }

    /// Create an extractor with the default English rule table
    pub fn default_config() -> Result<Self, ExtractorError> {
        Self::new(ExtractorConfig::default())
    }

    /// Create an extractor from a hand-built rule set
    ///
    /// Thresholds, weights, stop words and hint patterns still come from
    /// `config`; its pattern tables are ignored.
    pub fn with_rules(config: ExtractorConfig, rules: RuleSet) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let hints = config
            .hint_patterns
            .iter()
            .map(|p| compile(p, NAME_GROUP))
            .collect::<Result<Vec<_>, _>>()?;
        let filter = CandidateFilter::new(config.min_name_length, &config.stop_words);

        Ok(Self {
            config,
            rules,
            hints,
            filter,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Get the compiled rules
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Detect the most likely supplier mentioned by a post
    pub fn detect_supplier_from_post(&self, post: &Post) -> Option<DetectedSupplier> {
        self.detect_in(&post.content, post.category)
    }

    /// Detect the most likely supplier in `content`
    ///
    /// Returns `None` when nothing reaches `min_confidence`.
    pub fn detect_in(&self, content: &str, category: Option<Category>) -> Option<DetectedSupplier> {
        let best = self
            .candidates(content, category)
            .into_iter()
            .fold(None, |best: Option<DetectedSupplier>, candidate| match best {
                Some(best) if best.confidence >= candidate.confidence => Some(best),
                _ => Some(candidate),
            })?;

        if best.confidence < self.config.min_confidence {
            debug!(
                "Best candidate '{}' at {:.2} is below threshold {:.2}",
                best.name, best.confidence, self.config.min_confidence
            );
            return None;
        }

        debug!(
            "Detected supplier '{}' ({}, confidence {:.2})",
            best.name,
            best.source.as_str(),
            best.confidence
        );
        Some(best)
    }

    /// The first acceptable match of every applicable rule, in rule order
    ///
    /// Unlike [`detect_in`](Self::detect_in) this applies no confidence
    /// threshold, so callers can see what every tier would have produced.
    pub fn candidates(&self, content: &str, category: Option<Category>) -> Vec<DetectedSupplier> {
        let mut found = Vec::new();

        for rule in self.rules.rules().iter().filter(|r| r.applies_to(category)) {
            let tier = rule.tier();
            let accepted = rule.matches(content).into_iter().find(|candidate| {
                match self.filter.rejection(candidate.span()) {
                    Some(reason) => {
                        debug!(
                            "Rejected '{}' from {}: {}",
                            candidate.name,
                            tier.as_str(),
                            reason
                        );
                        false
                    }
                    None => true,
                }
            });

            if let Some(candidate) = accepted {
                found.push(DetectedSupplier {
                    name: candidate.name,
                    confidence: self.config.weights.weight(tier),
                    category,
                    source: tier,
                    location: candidate.location,
                });
            }
        }

        found
    }

    /// Best-effort supplier name for a draft, for live "supplier detected"
    /// hints while a post is being written
    ///
    /// Returns an empty string when nothing plausible is found.
    pub fn extract_supplier_name(&self, text: &str) -> String {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return String::new();
        }

        for hint in &self.hints {
            let Some(caps) = hint.captures(&lowered) else {
                continue;
            };
            let Some(name) = caps.name(NAME_GROUP) else {
                continue;
            };

            let name = title_case(name.as_str());
            if self.filter.rejection(&name).is_none() {
                return name;
            }
        }

        String::new()
    }
}

impl SupplierDetector for SupplierExtractor {
    fn detect(&self, post: &Post) -> Option<DetectedSupplier> {
        self.detect_supplier_from_post(post)
    }
}
