//! Core Aggregator implementation: grouping detections and promoting suppliers

use crate::{AggregatorConfig, AggregatorError, AggregatorMetrics};
use mandi_domain::traits::{PostStore, SupplierDetector, SupplierStore};
use mandi_domain::{name_key, DetectedSupplier, Post, Supplier, SupplierId};
use mandi_extractor::SupplierExtractor;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one aggregation pass
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Suppliers promoted by the pass, in order of first mention
    pub suppliers: Vec<Supplier>,

    /// What the pass saw and decided
    pub metrics: AggregatorMetrics,
}

/// One distinct candidate name and the posts backing it
struct CandidateGroup<'a> {
    key: String,
    representative: DetectedSupplier,
    corroborating: Vec<&'a Post>,
}

/// Aggregator service: turns repeated detections into supplier records
///
/// Every pass recomputes detections from the full corpus; nothing is
/// cached between passes, so a pass over an unchanged corpus against its
/// own output promotes nothing.
///
/// # Examples
///
/// ```
/// use mandi_aggregator::Aggregator;
/// use mandi_domain::{Author, Category, Location, Post, PostId, UserId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let aggregator = Aggregator::default_config()?;
/// let author = Author { name: "Asha".to_string(), id: UserId::new("asha") };
/// let posts: Vec<Post> = (0..2)
///     .map(|_| {
///         Post::new(
///             PostId::new(),
///             "Got tomatoes from Green Valley Farms",
///             Some(Category::Vegetables),
///             author.clone(),
///             0,
///             Location::at(28.65, 77.19),
///         )
///     })
///     .collect();
///
/// let promoted = aggregator.analyze(&posts, &[]);
/// assert_eq!(promoted.len(), 1);
/// assert_eq!(promoted[0].name, "Green Valley Farms");
/// # Ok(())
/// # }
/// ```
pub struct Aggregator<D = SupplierExtractor> {
    detector: D,
    config: AggregatorConfig,
    metrics: AggregatorMetrics,
}

impl Aggregator<SupplierExtractor> {
    /// Create an Aggregator with the default extractor and configuration
    pub fn default_config() -> Result<Self, AggregatorError> {
        let extractor = SupplierExtractor::default_config()
            .map_err(|e| AggregatorError::Config(e.to_string()))?;
        Self::new(extractor, AggregatorConfig::default())
    }
}

impl<D: SupplierDetector> Aggregator<D> {
    /// Create a new Aggregator with the given detector and configuration
    pub fn new(detector: D, config: AggregatorConfig) -> Result<Self, AggregatorError> {
        config.validate().map_err(AggregatorError::Config)?;
        Ok(Self {
            detector,
            config,
            metrics: AggregatorMetrics::new(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Get the detector
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a reference to the cumulative metrics of store passes
    pub fn metrics(&self) -> &AggregatorMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// New suppliers warranted by `posts` that `existing` does not hold yet
    pub fn analyze(&self, posts: &[Post], existing: &[Supplier]) -> Vec<Supplier> {
        self.analysis(posts, existing).suppliers
    }

    /// Like [`analyze`](Self::analyze), also reporting per-pass metrics
    ///
    /// Pure: neither the aggregator's cumulative metrics nor any store are
    /// touched.
    pub fn analysis(&self, posts: &[Post], existing: &[Supplier]) -> Analysis {
        let start = Instant::now();
        let mut metrics = AggregatorMetrics::new();
        metrics.record_posts(posts.len());

        let known: HashSet<String> = existing.iter().map(|s| name_key(&s.name)).collect();
        let mut suppliers = Vec::new();

        for group in self.group_detections(posts, &mut metrics) {
            if known.contains(&group.key) {
                debug!("'{}' is already a supplier", group.representative.name);
                metrics.record_skipped_existing();
                continue;
            }

            if group.corroborating.len() < self.config.min_corroborating_posts {
                debug!(
                    "'{}' has {} corroborating post(s), needs {}",
                    group.representative.name,
                    group.corroborating.len(),
                    self.config.min_corroborating_posts
                );
                metrics.record_below_threshold();
                continue;
            }

            suppliers.push(self.synthesize(&group));
        }

        metrics.total_runtime_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            "Analyzed {} posts: {} detections, {} new supplier(s)",
            posts.len(),
            metrics.total_detections(),
            suppliers.len()
        );

        Analysis { suppliers, metrics }
    }

    /// Analyze `posts` and write each new supplier into `store`
    ///
    /// Each name is looked up again right before its insert, so a supplier
    /// written since the roster snapshot is skipped rather than duplicated.
    /// In dry-run mode the would-be suppliers are returned and nothing is
    /// written.
    pub fn promote_into<S>(
        &mut self,
        posts: &[Post],
        store: &mut S,
    ) -> Result<Analysis, AggregatorError>
    where
        S: SupplierStore,
        S::Error: Display,
    {
        let existing = store.list_suppliers().map_err(store_error)?;
        let Analysis {
            suppliers: candidates,
            mut metrics,
        } = self.analysis(posts, &existing);

        let mut suppliers = Vec::with_capacity(candidates.len());
        for supplier in candidates {
            if store
                .find_supplier_by_name(&supplier.name)
                .map_err(store_error)?
                .is_some()
            {
                warn!(
                    "Supplier '{}' was added since the snapshot, skipping",
                    supplier.name
                );
                metrics.record_skipped_existing();
                continue;
            }

            if self.config.dry_run {
                info!(
                    "DRY RUN: Would promote '{}' ({} up, {} down, verified: {})",
                    supplier.name, supplier.thumbs_up, supplier.thumbs_down, supplier.is_verified
                );
                suppliers.push(supplier);
                continue;
            }

            let id = store
                .insert_supplier(supplier.clone())
                .map_err(store_error)?;
            info!("Promoted supplier '{}' ({})", supplier.name, id);
            metrics.record_promotion();
            suppliers.push(Supplier { id, ..supplier });
        }

        metrics.record_scan();
        self.metrics.merge(&metrics);

        Ok(Analysis { suppliers, metrics })
    }

    /// Read the whole corpus from `store` and promote into it
    pub fn scan<S>(&mut self, store: &mut S) -> Result<Analysis, AggregatorError>
    where
        S: PostStore + SupplierStore,
        <S as PostStore>::Error: Display,
        <S as SupplierStore>::Error: Display,
    {
        let posts = PostStore::list_posts(store).map_err(store_error)?;
        self.promote_into(&posts, store)
    }

    /// Detect every post once and group the detections by name key
    ///
    /// Groups keep the order of first mention. A post counts towards a
    /// group's corroboration at most once, and only when its detection is
    /// confident enough.
    fn group_detections<'a>(
        &self,
        posts: &'a [Post],
        metrics: &mut AggregatorMetrics,
    ) -> Vec<CandidateGroup<'a>> {
        let mut groups: Vec<CandidateGroup<'a>> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for post in posts {
            let Some(detected) = self.detector.detect(post) else {
                continue;
            };
            metrics.record_detection(detected.source);

            let key = detected.key();
            let slot = match index.get(&key) {
                Some(slot) => *slot,
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(CandidateGroup {
                        key,
                        representative: detected.clone(),
                        corroborating: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            let group = &mut groups[slot];
            if detected.confidence >= self.config.corroboration_confidence
                && !group.corroborating.iter().any(|p| p.id == post.id)
            {
                group.corroborating.push(post);
            }
        }

        groups
    }

    /// Build the supplier record for a promoted group
    fn synthesize(&self, group: &CandidateGroup<'_>) -> Supplier {
        let detected = &group.representative;
        let (thumbs_up, thumbs_down) = group
            .corroborating
            .iter()
            .fold((0u32, 0u32), |(up, down), post| {
                (up.saturating_add(post.likes), down.saturating_add(post.dislikes))
            });

        Supplier {
            id: SupplierId::new(),
            name: detected.name.clone(),
            category: detected.category,
            thumbs_up,
            thumbs_down,
            is_verified: detected.confidence >= self.config.verification_confidence,
            location: self
                .config
                .fallback_location
                .to_location(detected.location.as_deref()),
        }
    }
}

fn store_error(e: impl Display) -> AggregatorError {
    AggregatorError::Store(e.to_string())
}
