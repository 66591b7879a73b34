//! Mandi Aggregator
//!
//! Decides when a supplier name inferred from posts graduates into a
//! first-class supplier record.
//!
//! # Overview
//!
//! The Aggregator is responsible for:
//! - **Grouping**: Running the detector over every post and grouping
//!   detections by case-insensitive name
//! - **Corroboration**: Counting distinct posts that name a supplier with
//!   enough confidence (0.6 by default)
//! - **Promotion**: Synthesizing a supplier once two posts agree, summing
//!   their likes and dislikes, and writing it to the store
//! - **Statistics**: Per-supplier post counts and ratings
//! - **Metrics collection**: Tracking passes, detections and promotions
//!
//! # Usage
//!
//! ## One-time Pass
//!
//! ```no_run
//! use mandi_aggregator::Aggregator;
//! use mandi_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("mandi.db")?;
//! let mut aggregator = Aggregator::default_config()?;
//!
//! let analysis = aggregator.scan(&mut store)?;
//! println!("{} new supplier(s)", analysis.suppliers.len());
//! println!("{}", aggregator.metrics().summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use mandi_aggregator::{Aggregator, AggregatorWorker};
//! use mandi_store::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = SqliteStore::new("mandi.db")?;
//!     let mut worker = AggregatorWorker::new(Aggregator::default_config()?);
//!
//!     // Ask for a pass as soon as the worker starts
//!     worker.trigger().notify_one();
//!
//!     // Run indefinitely (until Ctrl+C)
//!     worker.run(&mut store).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use mandi_aggregator::AggregatorConfig;
//!
//! // Default: two posts at confidence 0.6 or more
//! let config = AggregatorConfig::default();
//!
//! // Strict: three posts at 0.8 or more
//! let config = AggregatorConfig::strict();
//!
//! // Lenient: a single post, location-only mentions included
//! let config = AggregatorConfig::lenient();
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [aggregator]
//! corroboration_confidence = 0.6
//! min_corroborating_posts = 2
//! verification_confidence = 0.7
//! scan_interval_secs = 300
//! dry_run = false
//!
//! [aggregator.fallback_location]
//! latitude = 28.6129
//! longitude = 77.2295
//! area = "Delhi"
//! city = "Delhi"
//! ```

#![warn(missing_docs)]

mod aggregator;
mod config;
mod error;
mod metrics;
mod stats;
mod worker;

pub use aggregator::{Aggregator, Analysis};
pub use config::{AggregatorConfig, FallbackLocation};
pub use error::AggregatorError;
pub use metrics::AggregatorMetrics;
pub use stats::{attributed_posts, supplier_stats, SupplierStats};
pub use worker::AggregatorWorker;
