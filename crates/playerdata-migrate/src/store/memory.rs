//! In-memory document store for dry runs and tests.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use std::sync::{Mutex, MutexGuard};

use super::{user_uuid, DocumentStore};
use crate::error::Result;

#[derive(Debug, Default)]
struct Collections {
    users: Vec<Document>,
    banks: Vec<Document>,
    bulk_writes: usize,
}

/// Store that keeps documents in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Snapshot of the `users` collection.
    #[must_use]
    pub fn users(&self) -> Vec<Document> {
        self.lock().users.clone()
    }

    /// Snapshot of the `banks` collection.
    #[must_use]
    pub fn banks(&self) -> Vec<Document> {
        self.lock().banks.clone()
    }

    /// Number of non-empty bulk writes received.
    #[must_use]
    pub fn bulk_writes(&self) -> usize {
        self.lock().bulk_writes
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_user_id(&self, uuid: &str) -> Result<Option<Bson>> {
        let inner = self.lock();
        Ok(inner
            .users
            .iter()
            .find(|u| u.get_str("uuid").is_ok_and(|v| v == uuid))
            .and_then(|u| u.get("_id").cloned()))
    }

    async fn insert_user(&self, uuid: &str) -> Result<Bson> {
        let id = Bson::ObjectId(ObjectId::new());
        self.lock().users.push(doc! { "_id": id.clone(), "uuid": uuid });
        Ok(id)
    }

    async fn insert_banks(&self, banks: Vec<Document>) -> Result<u64> {
        if banks.is_empty() {
            return Ok(0);
        }
        let mut inner = self.lock();
        inner.bulk_writes += 1;
        let count = banks.len() as u64;
        for mut bank in banks {
            if !bank.contains_key("_id") {
                bank.insert("_id", ObjectId::new());
            }
            inner.banks.push(bank);
        }
        Ok(count)
    }

    async fn upsert_users(&self, users: Vec<Document>) -> Result<u64> {
        if users.is_empty() {
            return Ok(0);
        }
        let mut inner = self.lock();
        inner.bulk_writes += 1;
        let count = users.len() as u64;
        for mut user in users {
            let uuid = user_uuid(&user)?.to_string();
            let existing = inner
                .users
                .iter_mut()
                .find(|u| u.get_str("uuid").is_ok_and(|v| v == uuid));
            match existing {
                Some(current) => {
                    if let Some(id) = current.get("_id").cloned() {
                        user.insert("_id", id);
                    }
                    *current = user;
                }
                None => {
                    user.insert("_id", ObjectId::new());
                    inner.users.push(user);
                }
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_lookup_or_insert() {
        let store = MemoryStore::new();
        assert!(store.find_user_id("abc").await.unwrap().is_none());

        let id = store.insert_user("abc").await.unwrap();
        assert_eq!(store.find_user_id("abc").await.unwrap(), Some(id));
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_uuid_and_keeps_id() {
        let store = MemoryStore::new();
        let id = store.insert_user("abc").await.unwrap();

        let written = store
            .upsert_users(vec![
                doc! { "uuid": "abc", "name": "Steve" },
                doc! { "uuid": "def", "name": "Alex" },
            ])
            .await
            .unwrap();
        assert_eq!(written, 2);

        let users = store.users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].get("_id"), Some(&id));
        assert_eq!(users[0].get_str("name").unwrap(), "Steve");
        assert_eq!(store.bulk_writes(), 1);
    }

    #[tokio::test]
    async fn test_empty_batches_are_noops() {
        let store = MemoryStore::new();
        assert_eq!(store.insert_banks(Vec::new()).await.unwrap(), 0);
        assert_eq!(store.upsert_users(Vec::new()).await.unwrap(), 0);
        assert_eq!(store.bulk_writes(), 0);
    }

    #[tokio::test]
    async fn test_upsert_without_uuid_fails() {
        let store = MemoryStore::new();
        let result = store.upsert_users(vec![doc! { "name": "nobody" }]).await;
        assert!(result.is_err());
    }
}
