//! Mandi Storage Layer
//!
//! Implements the PostStore, SupplierStore and VoteStore traits on SQLite.
//!
//! # Architecture
//!
//! - `posts`: community reviews with their like/dislike counters
//! - `suppliers`: the roster, unique on the trimmed lower-cased name
//! - `votes`: one active vote per (user, target); counters are updated in
//!   the same transaction as the vote row
//!
//! # Examples
//!
//! ```no_run
//! use mandi_store::SqliteStore;
//!
//! let store = SqliteStore::new("mandi.db").unwrap();
//! // Store is now ready for post, supplier and vote operations
//! ```

#![warn(missing_docs)]

use mandi_domain::traits::{PostStore, SupplierStore, VoteStore};
use mandi_domain::{
    name_key, resolve_vote, Author, Category, Location, Post, PostId, Supplier, SupplierId,
    UserId, Vote, VoteChange, VoteDirection, VoteTarget,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record with the same key already exists
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

const POST_COLUMNS: &str = "id, content, category, author_name, author_id, supplier_name, \
     likes, dislikes, comments, created_at, latitude, longitude, address, area, city";

const SUPPLIER_COLUMNS: &str = "id, name, category, thumbs_up, thumbs_down, is_verified, \
     latitude, longitude, address, area, city";

/// SQLite-based implementation of the Mandi stores
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory store
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Number of stored posts
    pub fn post_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn timestamp_to_sql(value: u64) -> Result<i64, StoreError> {
        i64::try_from(value)
            .map_err(|_| StoreError::InvalidData(format!("Timestamp out of range: {}", value)))
    }

    fn coordinate_to_sql(value: f64) -> Option<f64> {
        (!value.is_nan()).then_some(value)
    }

    fn column_u32(row: &Row<'_>, idx: usize) -> rusqlite::Result<u32> {
        let value: i64 = row.get(idx)?;
        u32::try_from(value).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Integer,
                Box::new(e),
            )
        })
    }

    fn column_u64(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
        let value: i64 = row.get(idx)?;
        u64::try_from(value).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Integer,
                Box::new(e),
            )
        })
    }

    fn column_category(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Category>> {
        let value: Option<String> = row.get(idx)?;
        Ok(value.as_deref().and_then(Category::parse))
    }

    /// Read a location from five consecutive columns starting at `idx`
    fn column_location(row: &Row<'_>, idx: usize) -> rusqlite::Result<Location> {
        let latitude: Option<f64> = row.get(idx)?;
        let longitude: Option<f64> = row.get(idx + 1)?;
        Ok(Location {
            latitude: latitude.unwrap_or(f64::NAN),
            longitude: longitude.unwrap_or(f64::NAN),
            address: row.get(idx + 2)?,
            area: row.get(idx + 3)?,
            city: row.get(idx + 4)?,
        })
    }

    fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
        let id: String = row.get(0)?;
        let author_id: String = row.get(4)?;
        Ok(Post {
            id: PostId::from(id),
            content: row.get(1)?,
            category: Self::column_category(row, 2)?,
            author: Author {
                name: row.get(3)?,
                id: UserId::new(author_id),
            },
            supplier_name: row.get(5)?,
            likes: Self::column_u32(row, 6)?,
            dislikes: Self::column_u32(row, 7)?,
            comments: Self::column_u32(row, 8)?,
            created_at: Self::column_u64(row, 9)?,
            location: Self::column_location(row, 10)?,
        })
    }

    fn supplier_from_row(row: &Row<'_>) -> rusqlite::Result<Supplier> {
        let id: String = row.get(0)?;
        Ok(Supplier {
            id: SupplierId::from(id),
            name: row.get(1)?,
            category: Self::column_category(row, 2)?,
            thumbs_up: Self::column_u32(row, 3)?,
            thumbs_down: Self::column_u32(row, 4)?,
            is_verified: row.get(5)?,
            location: Self::column_location(row, 6)?,
        })
    }

    fn vote_from_row(row: &Row<'_>) -> rusqlite::Result<Vote> {
        let user_id: String = row.get(0)?;
        let kind: String = row.get(1)?;
        let target_id: String = row.get(2)?;
        let direction: String = row.get(3)?;

        let target = Self::target_from_parts(&kind, target_id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let direction = VoteDirection::parse(&direction).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown vote direction: {}",
                    direction
                ))),
            )
        })?;

        Ok(Vote {
            user: UserId::new(user_id),
            target,
            direction,
            cast_at: Self::column_u64(row, 4)?,
        })
    }

    /// Table, counter columns and key for a vote target
    fn target_parts(target: &VoteTarget) -> (&'static str, &'static str, &'static str, &str) {
        match target {
            VoteTarget::Post(id) => ("post", "likes", "dislikes", id.as_str()),
            VoteTarget::Supplier(id) => ("supplier", "thumbs_up", "thumbs_down", id.as_str()),
        }
    }

    fn target_from_parts(kind: &str, id: String) -> Result<VoteTarget, StoreError> {
        match kind {
            "post" => Ok(VoteTarget::Post(PostId::from(id))),
            "supplier" => Ok(VoteTarget::Supplier(SupplierId::from(id))),
            _ => Err(StoreError::InvalidData(format!(
                "Unknown vote target kind: {}",
                kind
            ))),
        }
    }
}

impl PostStore for SqliteStore {
    type Error = StoreError;

    fn insert_post(&mut self, post: Post) -> Result<PostId, Self::Error> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM posts WHERE id = ?1",
                params![post.id.as_str()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(format!("post {}", post.id)));
        }

        self.conn.execute(
            &format!(
                "INSERT INTO posts ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                POST_COLUMNS
            ),
            params![
                post.id.as_str(),
                &post.content,
                post.category.map(|c| c.as_str()),
                &post.author.name,
                post.author.id.as_str(),
                &post.supplier_name,
                post.likes,
                post.dislikes,
                post.comments,
                Self::timestamp_to_sql(post.created_at)?,
                Self::coordinate_to_sql(post.location.latitude),
                Self::coordinate_to_sql(post.location.longitude),
                &post.location.address,
                &post.location.area,
                &post.location.city,
            ],
        )?;

        tracing::debug!("Inserted post {}", post.id);
        Ok(post.id)
    }

    fn get_post(&self, id: &PostId) -> Result<Option<Post>, Self::Error> {
        let post = self
            .conn
            .query_row(
                &format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS),
                params![id.as_str()],
                Self::post_from_row,
            )
            .optional()?;

        Ok(post)
    }

    fn list_posts(&self) -> Result<Vec<Post>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM posts ORDER BY created_at DESC, rowid DESC",
            POST_COLUMNS
        ))?;

        let posts = stmt
            .query_map([], Self::post_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }
}

impl SupplierStore for SqliteStore {
    type Error = StoreError;

    fn insert_supplier(&mut self, supplier: Supplier) -> Result<SupplierId, Self::Error> {
        let key = name_key(&supplier.name);
        if key.is_empty() {
            return Err(StoreError::InvalidData(
                "Supplier name cannot be empty".to_string(),
            ));
        }

        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM suppliers WHERE name_key = ?1 OR id = ?2",
                params![&key, supplier.id.as_str()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(format!("supplier {}", supplier.name)));
        }

        self.conn.execute(
            "INSERT INTO suppliers (id, name, name_key, category, thumbs_up, thumbs_down, is_verified,
                                    latitude, longitude, address, area, city)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                supplier.id.as_str(),
                &supplier.name,
                &key,
                supplier.category.map(|c| c.as_str()),
                supplier.thumbs_up,
                supplier.thumbs_down,
                supplier.is_verified,
                Self::coordinate_to_sql(supplier.location.latitude),
                Self::coordinate_to_sql(supplier.location.longitude),
                &supplier.location.address,
                &supplier.location.area,
                &supplier.location.city,
            ],
        )?;

        tracing::debug!("Inserted supplier '{}' ({})", supplier.name, supplier.id);
        Ok(supplier.id)
    }

    fn get_supplier(&self, id: &SupplierId) -> Result<Option<Supplier>, Self::Error> {
        let supplier = self
            .conn
            .query_row(
                &format!("SELECT {} FROM suppliers WHERE id = ?1", SUPPLIER_COLUMNS),
                params![id.as_str()],
                Self::supplier_from_row,
            )
            .optional()?;

        Ok(supplier)
    }

    fn find_supplier_by_name(&self, name: &str) -> Result<Option<Supplier>, Self::Error> {
        let supplier = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM suppliers WHERE name_key = ?1",
                    SUPPLIER_COLUMNS
                ),
                params![name_key(name)],
                Self::supplier_from_row,
            )
            .optional()?;

        Ok(supplier)
    }

    fn list_suppliers(&self) -> Result<Vec<Supplier>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM suppliers ORDER BY rowid",
            SUPPLIER_COLUMNS
        ))?;

        let suppliers = stmt
            .query_map([], Self::supplier_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(suppliers)
    }
}

impl VoteStore for SqliteStore {
    type Error = StoreError;

    fn cast_vote(
        &mut self,
        user: &UserId,
        target: &VoteTarget,
        direction: VoteDirection,
        cast_at: u64,
    ) -> Result<VoteChange, Self::Error> {
        let (kind, up_column, down_column, target_id) = Self::target_parts(target);
        let table = match target {
            VoteTarget::Post(_) => "posts",
            VoteTarget::Supplier(_) => "suppliers",
        };
        let cast_at = Self::timestamp_to_sql(cast_at)?;

        let tx = self.conn.transaction()?;

        let exists = tx
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1", table),
                params![target_id],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !exists {
            return Err(StoreError::NotFound(format!("{} {}", kind, target_id)));
        }

        let previous: Option<String> = tx
            .query_row(
                "SELECT direction FROM votes
                 WHERE user_id = ?1 AND target_kind = ?2 AND target_id = ?3",
                params![user.as_str(), kind, target_id],
                |row| row.get(0),
            )
            .optional()?;
        let previous = previous.as_deref().and_then(VoteDirection::parse);

        let change = resolve_vote(previous, direction);

        match change.current {
            Some(current) => {
                tx.execute(
                    "INSERT INTO votes (user_id, target_kind, target_id, direction, cast_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(user_id, target_kind, target_id) DO UPDATE SET
                     direction = excluded.direction, cast_at = excluded.cast_at",
                    params![user.as_str(), kind, target_id, current.as_str(), cast_at],
                )?;
            }
            None => {
                tx.execute(
                    "DELETE FROM votes WHERE user_id = ?1 AND target_kind = ?2 AND target_id = ?3",
                    params![user.as_str(), kind, target_id],
                )?;
            }
        }

        tx.execute(
            &format!(
                "UPDATE {table} SET {up} = MAX(0, {up} + ?1), {down} = MAX(0, {down} + ?2) WHERE id = ?3",
                table = table,
                up = up_column,
                down = down_column
            ),
            params![change.up_delta(), change.down_delta(), target_id],
        )?;

        tx.commit()?;

        tracing::debug!(
            "Vote by {} on {} {}: {:?} -> {:?}",
            user,
            kind,
            target_id,
            change.previous,
            change.current
        );
        Ok(change)
    }

    fn current_vote(
        &self,
        user: &UserId,
        target: &VoteTarget,
    ) -> Result<Option<VoteDirection>, Self::Error> {
        let (kind, _, _, target_id) = Self::target_parts(target);

        let direction: Option<String> = self
            .conn
            .query_row(
                "SELECT direction FROM votes
                 WHERE user_id = ?1 AND target_kind = ?2 AND target_id = ?3",
                params![user.as_str(), kind, target_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(direction.as_deref().and_then(VoteDirection::parse))
    }

    fn votes_by(&self, user: &UserId) -> Result<Vec<Vote>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, target_kind, target_id, direction, cast_at
             FROM votes WHERE user_id = ?1
             ORDER BY cast_at DESC, rowid DESC",
        )?;

        let votes = stmt
            .query_map(params![user.as_str()], Self::vote_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        let mut store = SqliteStore::in_memory().unwrap();
        assert!(store.initialize_schema().is_ok());
        assert_eq!(store.post_count().unwrap(), 0);
    }

    #[test]
    fn test_nan_coordinates_read_back_as_nan() {
        let mut store = SqliteStore::in_memory().unwrap();
        let post = Post::new(
            PostId::from("p1"),
            "no gps",
            None,
            Author {
                name: "Sunil".to_string(),
                id: UserId::new("sunil"),
            },
            10,
            Location::at(f64::NAN, 77.2),
        );
        store.insert_post(post).unwrap();

        let stored = store.get_post(&PostId::from("p1")).unwrap().unwrap();
        assert!(stored.location.latitude.is_nan());
        assert_eq!(stored.location.longitude, 77.2);
        assert!(!stored.location.is_valid());
    }

    #[test]
    fn test_target_parts_round_trip() {
        let target = VoteTarget::Supplier(SupplierId::from("s1"));
        let (kind, _, _, id) = SqliteStore::target_parts(&target);
        assert_eq!(
            SqliteStore::target_from_parts(kind, id.to_string()).unwrap(),
            target
        );
        assert!(SqliteStore::target_from_parts("comment", "c1".to_string()).is_err());
    }
}
