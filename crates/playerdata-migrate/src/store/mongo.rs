//! MongoDB document store.

use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{Acknowledgment, ClientOptions, Credential, ServerAddress, WriteConcern};
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use tracing::{debug, info};

use super::{user_uuid, DocumentStore, BANKS_COLLECTION, USERS_COLLECTION};
use crate::config::ConnectionSettings;
use crate::error::{Error, Result};

/// Statements per `update` command; keeps each command under the server's
/// message size limit.
const UPSERT_BATCH_SIZE: usize = 1000;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Store backed by a MongoDB database.
pub struct MongoStore {
    db: Database,
    users: Collection<Document>,
    banks: Collection<Document>,
}

impl MongoStore {
    /// Connects and pings the server.
    ///
    /// Credentials are only sent when a password was given; they are checked
    /// against the target database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid address and
    /// [`Error::Database`] if the server cannot be reached or rejects the
    /// credentials.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self> {
        let address = ServerAddress::parse(format!("{}:{}", settings.host, settings.port))
            .map_err(|e| Error::Config(format!("invalid database address: {}", e)))?;

        let mut options = ClientOptions::builder()
            .hosts(vec![address])
            .app_name(env!("CARGO_PKG_NAME").to_string())
            .server_selection_timeout(SERVER_SELECTION_TIMEOUT)
            .build();
        if settings.has_credentials() {
            options.credential = Some(
                Credential::builder()
                    .username(settings.user.clone())
                    .password(settings.password.clone())
                    .source(settings.database.clone())
                    .build(),
            );
        }

        let client = Client::with_options(options)?;
        let db = client.database(&settings.database);
        db.run_command(doc! { "ping": 1 }).await?;
        info!(
            "Connected to MongoDB at {}:{}/{}",
            settings.host, settings.port, settings.database
        );

        Ok(Self::from_database(db))
    }

    /// Wraps an existing database handle.
    #[must_use]
    pub fn from_database(db: Database) -> Self {
        Self {
            users: db.collection(USERS_COLLECTION),
            banks: db.collection(BANKS_COLLECTION),
            db,
        }
    }
}

fn majority() -> WriteConcern {
    WriteConcern::builder().w(Acknowledgment::Majority).build()
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_user_id(&self, uuid: &str) -> Result<Option<Bson>> {
        let user = self.users.find_one(doc! { "uuid": uuid }).await?;
        Ok(user.and_then(|u| u.get("_id").cloned()))
    }

    async fn insert_user(&self, uuid: &str) -> Result<Bson> {
        let result = self.users.insert_one(doc! { "uuid": uuid }).await?;
        debug!("Created user {}", uuid);
        Ok(result.inserted_id)
    }

    async fn insert_banks(&self, banks: Vec<Document>) -> Result<u64> {
        if banks.is_empty() {
            return Ok(0);
        }
        let total = banks.len();
        let result = self
            .banks
            .insert_many(banks)
            .ordered(false)
            .write_concern(majority())
            .await
            .map_err(|e| Error::BulkWrite(format!("inserting {} banks: {}", total, e)))?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn upsert_users(&self, users: Vec<Document>) -> Result<u64> {
        let mut written = 0u64;
        for chunk in users.chunks(UPSERT_BATCH_SIZE) {
            let mut updates = Vec::with_capacity(chunk.len());
            for user in chunk {
                let uuid = user_uuid(user)?;
                updates.push(doc! {
                    "q": { "uuid": uuid },
                    "u": user.clone(),
                    "upsert": true,
                });
            }

            let reply = self
                .db
                .run_command(doc! {
                    "update": USERS_COLLECTION,
                    "updates": updates,
                    "ordered": false,
                    "writeConcern": { "w": "majority" },
                })
                .await
                .map_err(|e| Error::BulkWrite(e.to_string()))?;
            written += check_update_reply(&reply, chunk.len())?;
        }
        Ok(written)
    }
}

/// Reads the `n` count from an `update` reply, failing on any write error.
fn check_update_reply(reply: &Document, attempted: usize) -> Result<u64> {
    if let Ok(errors) = reply.get_array("writeErrors") {
        if !errors.is_empty() {
            let first = errors
                .first()
                .and_then(Bson::as_document)
                .and_then(|e| e.get_str("errmsg").ok())
                .unwrap_or("unknown error");
            return Err(Error::BulkWrite(format!(
                "{} of {} upserts failed, first: {}",
                errors.len(),
                attempted,
                first
            )));
        }
    }
    if let Ok(concern) = reply.get_document("writeConcernError") {
        let message = concern.get_str("errmsg").unwrap_or("unknown error");
        return Err(Error::BulkWrite(format!("write concern failed: {}", message)));
    }
    let matched = match reply.get("n") {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        _ => 0,
    };
    Ok(matched.max(0) as u64)
}
