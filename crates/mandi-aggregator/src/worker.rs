//! Background worker for continuous supplier promotion

use crate::{Aggregator, AggregatorError, AggregatorMetrics};
use mandi_domain::traits::{PostStore, SupplierDetector, SupplierStore};
use mandi_extractor::SupplierExtractor;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::{interval, Duration};

/// Background worker that re-scans the post corpus
///
/// A pass runs on every interval tick and whenever the trigger handle is
/// notified (for example right after a post is created). Passes are
/// serialized, so the aggregator's per-insert name check is enough to keep
/// promotions unique.
///
/// # Examples
///
/// ```no_run
/// use mandi_aggregator::{Aggregator, AggregatorWorker};
/// use mandi_store::SqliteStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut store = SqliteStore::new("mandi.db")?;
///     let mut worker = AggregatorWorker::new(Aggregator::default_config()?);
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run(&mut store).await?;
///     Ok(())
/// }
/// ```
pub struct AggregatorWorker<D = SupplierExtractor> {
    aggregator: Aggregator<D>,
    interval: Duration,
    trigger: Arc<Notify>,
}

impl<D: SupplierDetector> AggregatorWorker<D> {
    /// Create a new background worker around an aggregator
    pub fn new(aggregator: Aggregator<D>) -> Self {
        let interval = aggregator.config().scan_interval();
        Self {
            aggregator,
            interval,
            trigger: Arc::new(Notify::new()),
        }
    }

    /// Handle for requesting an immediate pass ("posts changed")
    pub fn trigger(&self) -> Arc<Notify> {
        Arc::clone(&self.trigger)
    }

    /// Run the worker until Ctrl+C
    pub async fn run<S>(&mut self, store: &mut S) -> Result<(), AggregatorError>
    where
        S: PostStore + SupplierStore,
        <S as PostStore>::Error: Display,
        <S as SupplierStore>::Error: Display,
    {
        self.run_until(store, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run the worker until `shutdown` completes
    ///
    /// A failed pass is logged and the worker keeps going.
    pub async fn run_until<S, F>(&mut self, store: &mut S, shutdown: F) -> Result<(), AggregatorError>
    where
        S: PostStore + SupplierStore,
        <S as PostStore>::Error: Display,
        <S as SupplierStore>::Error: Display,
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.interval);
        let trigger = self.trigger();
        tokio::pin!(shutdown);

        tracing::info!(
            "Aggregator worker started (interval: {:?})",
            self.interval
        );

        loop {
            let reason = tokio::select! {
                _ = ticker.tick() => "interval",
                _ = trigger.notified() => "trigger",
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping aggregator");
                    break;
                }
            };

            tracing::debug!("Starting scan ({})", reason);
            match self.aggregator.scan(store) {
                Ok(analysis) => {
                    tracing::info!(
                        "Scan completed: {} posts, {} promoted",
                        analysis.metrics.posts_scanned,
                        analysis.suppliers.len()
                    );
                }
                Err(e) => {
                    tracing::error!("Scan failed: {}", e);
                }
            }
        }

        tracing::info!(
            "Aggregator stopped. Final metrics:\n{}",
            self.aggregator.metrics().summary()
        );

        Ok(())
    }

    /// Run for a specific number of passes (useful for testing)
    ///
    /// Each pass waits for the next tick or trigger, whichever comes first.
    /// The first tick completes immediately.
    pub async fn run_cycles<S>(&mut self, store: &mut S, cycles: usize) -> Result<(), AggregatorError>
    where
        S: PostStore + SupplierStore,
        <S as PostStore>::Error: Display,
        <S as SupplierStore>::Error: Display,
    {
        let mut ticker = interval(self.interval);
        let trigger = self.trigger();

        tracing::info!(
            "Aggregator worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = trigger.notified() => {}
            }

            tracing::debug!("Starting scan {}/{}", cycle + 1, cycles);

            match self.aggregator.scan(store) {
                Ok(analysis) => {
                    tracing::info!(
                        "Scan {}/{} completed: {} posts, {} promoted",
                        cycle + 1,
                        cycles,
                        analysis.metrics.posts_scanned,
                        analysis.suppliers.len()
                    );
                }
                Err(e) => {
                    tracing::error!("Scan {}/{} failed: {}", cycle + 1, cycles, e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Aggregator finished {} cycles. Final metrics:\n{}",
            cycles,
            self.aggregator.metrics().summary()
        );

        Ok(())
    }

    /// Get a reference to the aggregator's cumulative metrics
    pub fn metrics(&self) -> &AggregatorMetrics {
        self.aggregator.metrics()
    }

    /// Reset the aggregator's metrics counters
    pub fn reset_metrics(&mut self) {
        self.aggregator.reset_metrics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AggregatorConfig;
    use mandi_domain::{
        Author, Category, Location, Post, PostId, Supplier, SupplierId, UserId,
    };

    // Mock store for testing
    #[derive(Default)]
    struct MockStore {
        posts: Vec<Post>,
        suppliers: Vec<Supplier>,
        fail_reads: bool,
    }

    impl PostStore for MockStore {
        type Error = String;

        fn insert_post(&mut self, post: Post) -> Result<PostId, Self::Error> {
            let id = post.id.clone();
            self.posts.insert(0, post);
            Ok(id)
        }

        fn get_post(&self, id: &PostId) -> Result<Option<Post>, Self::Error> {
            Ok(self.posts.iter().find(|p| &p.id == id).cloned())
        }

        fn list_posts(&self) -> Result<Vec<Post>, Self::Error> {
            if self.fail_reads {
                return Err("disk on fire".to_string());
            }
            Ok(self.posts.clone())
        }
    }

    impl SupplierStore for MockStore {
        type Error = String;

        fn insert_supplier(&mut self, supplier: Supplier) -> Result<SupplierId, Self::Error> {
            let id = supplier.id.clone();
            self.suppliers.push(supplier);
            Ok(id)
        }

        fn get_supplier(&self, id: &SupplierId) -> Result<Option<Supplier>, Self::Error> {
            Ok(self.suppliers.iter().find(|s| &s.id == id).cloned())
        }

        fn find_supplier_by_name(&self, name: &str) -> Result<Option<Supplier>, Self::Error> {
            Ok(self.suppliers.iter().find(|s| s.has_name(name)).cloned())
        }

        fn list_suppliers(&self) -> Result<Vec<Supplier>, Self::Error> {
            Ok(self.suppliers.clone())
        }
    }

    fn create_test_post(content: &str) -> Post {
        Post::new(
            PostId::new(),
            content,
            Some(Category::Spices),
            Author {
                name: "Anil".to_string(),
                id: UserId::new("anil"),
            },
            1_700_000_000,
            Location::at(28.65, 77.19),
        )
        .with_votes(2, 1)
    }

    fn worker() -> AggregatorWorker {
        let config = AggregatorConfig {
            scan_interval_secs: 1,
            ..Default::default()
        };
        let extractor = SupplierExtractor::default_config().unwrap();
        AggregatorWorker::new(Aggregator::new(extractor, config).unwrap())
    }

    #[tokio::test]
    async fn test_worker_creation() {
        let worker = worker();
        assert_eq!(worker.metrics().scan_count, 0);
    }

    #[tokio::test]
    async fn test_run_cycles_promotes_once() {
        let mut store = MockStore::default();
        store.insert_post(create_test_post("Turmeric from Spice Palace was great")).unwrap();
        store.insert_post(create_test_post("Spice Palace never disappoints")).unwrap();

        let mut worker = worker();
        // Pre-load a trigger so the second pass does not wait for the tick
        worker.trigger().notify_one();
        worker.run_cycles(&mut store, 2).await.unwrap();

        assert_eq!(store.suppliers.len(), 1);
        assert_eq!(store.suppliers[0].name, "Spice Palace");
        assert_eq!(store.suppliers[0].thumbs_up, 4);

        let metrics = worker.metrics();
        assert_eq!(metrics.scan_count, 2);
        assert_eq!(metrics.promoted, 1);
        assert_eq!(metrics.skipped_existing, 1);
    }

    #[tokio::test]
    async fn test_run_cycles_stops_on_store_error() {
        let mut store = MockStore {
            fail_reads: true,
            ..Default::default()
        };

        let mut worker = worker();
        let result = worker.run_cycles(&mut store, 1).await;

        assert!(matches!(result, Err(AggregatorError::Store(_))));
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let mut store = MockStore::default();
        store.insert_post(create_test_post("Supplier Gupta Masala delivered")).unwrap();

        let mut worker = worker();
        worker
            .run_until(&mut store, tokio::time::sleep(Duration::from_millis(50)))
            .await
            .unwrap();

        // The first tick fires immediately
        assert!(worker.metrics().scan_count >= 1);
        assert!(store.suppliers.is_empty());
    }

    #[tokio::test]
    async fn test_reset_metrics() {
        let mut store = MockStore::default();
        let mut worker = worker();

        worker.run_cycles(&mut store, 1).await.unwrap();
        assert_eq!(worker.metrics().scan_count, 1);

        worker.reset_metrics();
        assert_eq!(worker.metrics().scan_count, 0);
    }
}
