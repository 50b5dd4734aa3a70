//! Destination document stores.
//!
//! Migrators talk to the database through [`DocumentStore`] so that dry runs
//! and tests can use [`MemoryStore`] instead of a live MongoDB.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::error::Result;

/// Collection holding one document per player.
pub const USERS_COLLECTION: &str = "users";

/// Collection holding one document per ender chest.
pub const BANKS_COLLECTION: &str = "banks";

/// Field that identifies a user document.
pub const UUID_FIELD: &str = "uuid";

/// Operations the migrators need from the destination database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `_id` of the user with this UUID, if one exists.
    async fn find_user_id(&self, uuid: &str) -> Result<Option<Bson>>;

    /// Inserts a bare user document and returns its `_id`.
    async fn insert_user(&self, uuid: &str) -> Result<Bson>;

    /// Inserts bank documents in one unordered bulk write.
    ///
    /// Returns the number of documents inserted. An empty batch is a no-op.
    async fn insert_banks(&self, banks: Vec<Document>) -> Result<u64>;

    /// Replaces user documents by their `uuid` field, inserting missing ones,
    /// in one unordered bulk write.
    ///
    /// Returns the number of documents matched or inserted. An empty batch is
    /// a no-op.
    async fn upsert_users(&self, users: Vec<Document>) -> Result<u64>;
}

/// UUID of a user document.
pub(crate) fn user_uuid(user: &Document) -> Result<&str> {
    user.get_str(UUID_FIELD).map_err(|e| {
        crate::error::Error::BulkWrite(format!("user document without '{}': {}", UUID_FIELD, e))
    })
}
