//! Mandi Domain Layer
//!
//! This crate contains the core business logic and domain model for Mandi,
//! a community marketplace where members review the suppliers they buy from.
//! It has no external dependencies beyond `uuid` and defines the value types,
//! scoring rules and trait interfaces every other layer depends upon.
//!
//! ## Key Concepts
//!
//! - **Post**: A member's free-text review, with like/dislike counters
//! - **Supplier**: A first-class supplier record, deduplicated by name
//! - **DetectedSupplier**: A transient candidate inferred from one post
//! - **Vote**: One active up/down vote per (user, target), with toggle semantics
//! - **Trust score**: Percentage of positive votes, bucketed into tiers
//! - **Proximity**: Haversine distance and nearest-first ordering
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod detection;
pub mod location;
pub mod post;
pub mod proximity;
pub mod supplier;
pub mod traits;
pub mod trust;
pub mod vote;

// Re-exports for convenience
pub use category::Category;
pub use detection::{DetectedSupplier, DetectionTier};
pub use location::{Located, Location};
pub use post::{Author, Post, PostId, UserId};
pub use proximity::{distance_km, sort_by_proximity, Nearby, EARTH_RADIUS_KM};
pub use supplier::{name_key, Supplier, SupplierId, SupplierQuery};
pub use trust::{trust_score, vote_percentage, TrustTier, DEFAULT_TRUST_SCORE};
pub use vote::{
    resolve_vote, Tally, Vote, VoteChange, VoteCounters, VoteDirection, VoteLedger, VoteTarget,
};
