//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{
    DetectedSupplier, Post, PostId, Supplier, SupplierId, UserId, Vote, VoteChange,
    VoteDirection, VoteTarget,
};

/// Trait for inferring a supplier from a post
///
/// Implemented by the application layer (mandi-extractor)
pub trait SupplierDetector {
    /// Detect at most one supplier candidate in a post
    fn detect(&self, post: &Post) -> Option<DetectedSupplier>;
}

/// Trait for storing and retrieving posts
///
/// Implemented by the infrastructure layer (mandi-store)
pub trait PostStore {
    /// Error type for store operations
    type Error;

    /// Insert a new post
    fn insert_post(&mut self, post: Post) -> Result<PostId, Self::Error>;

    /// Get a post by ID
    fn get_post(&self, id: &PostId) -> Result<Option<Post>, Self::Error>;

    /// Snapshot of every post, newest first
    fn list_posts(&self) -> Result<Vec<Post>, Self::Error>;
}

/// Trait for storing and retrieving suppliers
///
/// Implemented by the infrastructure layer (mandi-store)
pub trait SupplierStore {
    /// Error type for store operations
    type Error;

    /// Insert a new supplier; the store rejects a name it already holds
    fn insert_supplier(&mut self, supplier: Supplier) -> Result<SupplierId, Self::Error>;

    /// Get a supplier by ID
    fn get_supplier(&self, id: &SupplierId) -> Result<Option<Supplier>, Self::Error>;

    /// Find a supplier by name (case-insensitive)
    fn find_supplier_by_name(&self, name: &str) -> Result<Option<Supplier>, Self::Error>;

    /// Snapshot of the supplier roster
    fn list_suppliers(&self) -> Result<Vec<Supplier>, Self::Error>;
}

/// Trait for recording votes and keeping target counters in step
///
/// Implemented by the infrastructure layer (mandi-store)
pub trait VoteStore {
    /// Error type for store operations
    type Error;

    /// Cast a vote with toggle semantics and update the target's counters
    fn cast_vote(
        &mut self,
        user: &UserId,
        target: &VoteTarget,
        direction: VoteDirection,
        cast_at: u64,
    ) -> Result<VoteChange, Self::Error>;

    /// The user's active vote on a target
    fn current_vote(
        &self,
        user: &UserId,
        target: &VoteTarget,
    ) -> Result<Option<VoteDirection>, Self::Error>;

    /// A user's active votes, most recent first
    fn votes_by(&self, user: &UserId) -> Result<Vec<Vote>, Self::Error>;
}
