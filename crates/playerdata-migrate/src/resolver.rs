//! Remote item table: namespaced item names to legacy numeric ids.
//!
//! Newer player files store item ids as strings (`minecraft:stone`). The
//! numeric ids needed for the legacy material table come from a JSON list
//! published by an external service, fetched once per run.

use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::config::ItemTableConfig;
use crate::error::{Error, Result};

/// One entry of the remote item list.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteItem {
    /// Legacy numeric id.
    #[serde(rename = "type")]
    pub item_type: i32,
    /// Data value of this variant.
    pub meta: i32,
    /// Human-readable name.
    pub name: String,
    /// Item name without namespace, e.g. `stone`.
    pub text_type: String,
}

/// Case-insensitive item name to numeric id table.
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    ids: HashMap<String, i32>,
}

impl ItemTable {
    /// Builds the table; a later entry with the same name wins.
    pub fn from_items(items: impl IntoIterator<Item = RemoteItem>) -> Self {
        let ids = items
            .into_iter()
            .map(|item| (item.text_type.to_lowercase(), item.item_type))
            .collect();
        Self { ids }
    }

    /// Numeric id of an item name; 0 when unknown.
    ///
    /// Any `namespace:` prefix is ignored.
    #[must_use]
    pub fn resolve(&self, name: &str) -> i32 {
        let bare = name.split_once(':').map_or(name, |(_, rest)| rest);
        self.ids.get(&bare.to_lowercase()).copied().unwrap_or(0)
    }

    /// Number of known names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no names are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Creates the HTTP client used for the item table request.
///
/// # Errors
///
/// Returns [`Error::Http`] if the TLS backend cannot be initialized.
pub fn create_http_client(config: &ItemTableConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetches the remote item table.
pub struct ItemResolver {
    config: ItemTableConfig,
    client: Client,
}

impl ItemResolver {
    /// Creates a resolver for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ItemTableConfig) -> Result<Self> {
        let client = create_http_client(&config)?;
        Ok(Self { config, client })
    }

    /// Downloads and indexes the item list with a single request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolution`] on network failure, a non-success
    /// status, a malformed body or an empty list.
    pub async fn fetch(&self) -> Result<ItemTable> {
        let url = &self.config.url;
        debug!("Requesting item table from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Resolution(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Resolution(format!(
                "{} answered with status {}",
                url, status
            )));
        }

        let items: Vec<RemoteItem> = response
            .json()
            .await
            .map_err(|e| Error::Resolution(format!("malformed item list from {}: {}", url, e)))?;

        if items.is_empty() {
            return Err(Error::Resolution(format!("{} returned no items", url)));
        }

        let table = ItemTable::from_items(items);
        debug!("Item table holds {} names", table.len());
        Ok(table)
    }
}
