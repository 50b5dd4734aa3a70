//! Record accumulation and the final bulk writes.

use mongodb::bson::{self, Bson, Document};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::error::Result;
use crate::mapper::ItemRecord;
use crate::store::{DocumentStore, USERS_COLLECTION};

/// A DBRef pointing at a user document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRef {
    #[serde(rename = "$ref")]
    collection: &'static str,
    #[serde(rename = "$id")]
    id: Bson,
}

impl UserRef {
    /// Reference to the user with `_id` = `id`.
    #[must_use]
    pub fn new(id: Bson) -> Self {
        Self {
            collection: USERS_COLLECTION,
            id,
        }
    }

    /// Referenced `_id`.
    #[must_use]
    pub fn id(&self) -> &Bson {
        &self.id
    }
}

/// Ender chest contents of one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankRecord {
    /// Item stacks in slot order as stored in the file.
    pub items: Vec<ItemRecord>,
    /// Owner.
    pub user: UserRef,
}

/// Permission and economy data of one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    /// Player UUID.
    pub uuid: String,
    /// Permission groups kept after filtering.
    pub groups: Vec<String>,
    /// Chat prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_prefix: Option<String>,
    /// Chat suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_suffix: Option<String>,
    /// Last known player name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account balance.
    pub balance: f64,
}

/// Counts reported by [`RecordWriter::flush`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Bank documents inserted.
    pub banks: u64,
    /// User documents matched or inserted.
    pub users: u64,
}

impl WriteSummary {
    /// All documents written.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.banks + self.users
    }
}

/// Accumulates records and writes them with one bulk operation per
/// collection.
pub struct RecordWriter<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    user_ids: HashMap<String, Bson>,
    banks: Vec<Document>,
    users: Vec<Document>,
    user_index: HashMap<String, usize>,
}

impl<'a, S: DocumentStore + ?Sized> RecordWriter<'a, S> {
    /// Creates a writer over `store`.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            user_ids: HashMap::new(),
            banks: Vec::new(),
            users: Vec::new(),
            user_index: HashMap::new(),
        }
    }

    /// Reference to the user with `uuid`, creating the user if needed.
    ///
    /// Lookups are cached, so each UUID costs at most one round trip.
    ///
    /// # Errors
    ///
    /// Returns a database error if the lookup or insert fails.
    pub async fn user_reference(&mut self, uuid: &str) -> Result<UserRef> {
        if let Some(id) = self.user_ids.get(uuid) {
            return Ok(UserRef::new(id.clone()));
        }
        let id = match self.store.find_user_id(uuid).await? {
            Some(id) => id,
            None => {
                debug!("User {} not found, creating it", uuid);
                self.store.insert_user(uuid).await?
            }
        };
        self.user_ids.insert(uuid.to_string(), id.clone());
        Ok(UserRef::new(id))
    }

    /// Queues a bank for the final insert.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if the record cannot be
    /// converted to BSON.
    pub fn push_bank(&mut self, bank: &BankRecord) -> Result<()> {
        self.banks.push(bson::to_document(bank)?);
        Ok(())
    }

    /// Queues a user for the final upsert. A later record for the same UUID
    /// replaces the queued one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if the record cannot be
    /// converted to BSON.
    pub fn push_user(&mut self, user: &UserRecord) -> Result<()> {
        let document = bson::to_document(user)?;
        match self.user_index.get(&user.uuid) {
            Some(&index) => self.users[index] = document,
            None => {
                self.user_index.insert(user.uuid.clone(), self.users.len());
                self.users.push(document);
            }
        }
        Ok(())
    }

    /// Banks waiting to be written.
    #[must_use]
    pub fn pending_banks(&self) -> usize {
        self.banks.len()
    }

    /// Users waiting to be written.
    #[must_use]
    pub fn pending_users(&self) -> usize {
        self.users.len()
    }

    /// Writes everything queued. Empty queues cause no database call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BulkWrite`] if a bulk operation fails; documents
    /// already acknowledged stay written.
    pub async fn flush(&mut self) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();
        if !self.banks.is_empty() {
            summary.banks = self.store.insert_banks(std::mem::take(&mut self.banks)).await?;
        }
        if !self.users.is_empty() {
            self.user_index.clear();
            summary.users = self.store.upsert_users(std::mem::take(&mut self.users)).await?;
        }
        Ok(summary)
    }
}
