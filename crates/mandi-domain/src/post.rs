//! Post module - a community review of a supplier

use crate::category::Category;
use crate::location::{Located, Location};
use std::fmt;

/// Identifier of a post
///
/// Ids handed in by a collaborator are kept verbatim; freshly created posts
/// get a UUIDv7 string so they sort by creation time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(String);

impl PostId {
    /// Generate a new UUIDv7-based PostId
    ///
    /// # Examples
    ///
    /// ```
    /// use mandi_domain::PostId;
    ///
    /// let a = PostId::new();
    /// let b = PostId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a community member (their phone number)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a user id from a phone number or other stable handle
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who wrote a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Display name
    pub name: String,

    /// Stable identity used for votes
    pub id: UserId,
}

/// A review posted by a community member
///
/// Immutable after creation apart from the like/dislike counters, which only
/// change through vote operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Unique identifier
    pub id: PostId,

    /// Free-text review body
    pub content: String,

    /// Category of goods; `None` when the submitted category was not recognised
    pub category: Option<Category>,

    /// Author of the post
    pub author: Author,

    /// Supplier name inferred from the content, if any
    pub supplier_name: Option<String>,

    /// Active up-votes
    pub likes: u32,

    /// Active down-votes
    pub dislikes: u32,

    /// Number of comments
    pub comments: u32,

    /// Creation time (seconds since Unix epoch)
    pub created_at: u64,

    /// Where the post was written
    pub location: Location,
}

impl Post {
    /// Create a post with zeroed counters and no inferred supplier
    pub fn new(
        id: PostId,
        content: impl Into<String>,
        category: Option<Category>,
        author: Author,
        created_at: u64,
        location: Location,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            category,
            author,
            supplier_name: None,
            likes: 0,
            dislikes: 0,
            comments: 0,
            created_at,
            location,
        }
    }

    /// Set the like/dislike counters (seed data and imports)
    pub fn with_votes(mut self, likes: u32, dislikes: u32) -> Self {
        self.likes = likes;
        self.dislikes = dislikes;
        self
    }

    /// Total votes cast on this post
    pub fn total_votes(&self) -> u32 {
        self.likes + self.dislikes
    }
}

impl Located for Post {
    fn location(&self) -> &Location {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_has_zero_counters() {
        let author = Author {
            name: "Rajesh Kumar".to_string(),
            id: UserId::new("+91 98765 43210"),
        };
        let post = Post::new(
            PostId::from("1"),
            "Got tomatoes from Green Valley Farms",
            Some(Category::Vegetables),
            author,
            1_700_000_000,
            Location::at(28.6129, 77.2295),
        );

        assert_eq!(post.likes, 0);
        assert_eq!(post.dislikes, 0);
        assert_eq!(post.total_votes(), 0);
        assert!(post.supplier_name.is_none());
        assert_eq!(post.id.as_str(), "1");
    }

    #[test]
    fn test_post_id_from_external_value() {
        let id: PostId = "post-42".into();
        assert_eq!(id.to_string(), "post-42");
    }
}
