//! Mandi Extractor
//!
//! Infers which supplier a marketplace post is talking about.
//!
//! # Overview
//!
//! Members rarely tag the supplier they are reviewing; they write "got
//! tomatoes from Green Valley Farms" and move on. The extractor recovers
//! that name with an ordered table of heuristic rules, each tier carrying a
//! fixed confidence:
//!
//! | Tier | Confidence | Example |
//! |------|------------|---------|
//! | Brand dictionary | 0.8 | "...Spice Palace..." |
//! | Direct pattern | 0.9 | "bought from Sharma Store" |
//! | Category pattern | 0.6 | "milk from Anand Dairy" (dairy posts only) |
//! | Location fallback | 0.4 | "near Azadpur market" → "Azadpur Market" |
//!
//! # Architecture
//!
//! ```text
//! Post → SupplierExtractor → RuleSet (Brand | Pattern | Location) → DetectedSupplier
//! ```
//!
//! The rule table is data ([`ExtractorConfig`]) compiled into a [`RuleSet`];
//! swapping languages or adding categories never touches detection logic.
//!
//! # Example Usage
//!
//! ```
//! use mandi_extractor::SupplierExtractor;
//! use mandi_domain::Category;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = SupplierExtractor::default_config()?;
//!
//! let detected = extractor
//!     .detect_in("Got tomatoes from Green Valley Farms", Some(Category::Vegetables))
//!     .expect("supplier detected");
//! assert_eq!(detected.name, "Green Valley Farms");
//!
//! assert_eq!(extractor.extract_supplier_name("bought from sharma"), "Sharma");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod normalize;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{ExtractorConfig, TierWeights};
pub use error::ExtractorError;
pub use extractor::SupplierExtractor;
pub use normalize::title_case;
pub use rules::{Candidate, Rule, RuleSet, LOCATION_GROUP, NAME_GROUP};
