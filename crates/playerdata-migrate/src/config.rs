//! Configuration types for playerdata-migrate.
//!
//! Everything here is optional: without a config file the tool runs on
//! defaults and asks the operator for the rest.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::prompt::Answers;

/// Default item table location.
pub const DEFAULT_ITEM_TABLE_URL: &str = "http://minecraft-ids.grahamedgecombe.com/items.json";

/// The item table host rejects requests without a browser user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 \
                                      (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";

/// Main migration configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Remote item table settings.
    #[serde(default)]
    pub item_table: ItemTableConfig,
    /// Migration options.
    #[serde(default)]
    pub options: MigrationOptions,
    /// Per-migrator default answers, keyed by migrator name then question key.
    #[serde(default)]
    pub answers: HashMap<String, HashMap<String, String>>,
}

/// Remote item table settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTableConfig {
    /// URL of the JSON item list.
    #[serde(default = "default_item_table_url")]
    pub url: String,
    /// User-Agent header sent with the request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ItemTableConfig {
    fn default() -> Self {
        Self {
            url: default_item_table_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Migration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationOptions {
    /// Decode and map without touching the database.
    #[serde(default)]
    pub dry_run: bool,
    /// Log a progress line every this many files or users.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            progress_interval: default_progress_interval(),
        }
    }
}

fn default_item_table_url() -> String {
    DEFAULT_ITEM_TABLE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_progress_interval() -> usize {
    100
}

impl MigrationConfig {
    /// Loads a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Checks values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let url = &self.item_table.url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Invalid item table URL '{}'. Allowed schemes: http, https",
                url
            )));
        }
        if self.item_table.timeout_secs == 0 || self.item_table.connect_timeout_secs == 0 {
            return Err(Error::Config(
                "item table timeouts must be greater than 0".to_string(),
            ));
        }
        if self.options.progress_interval == 0 {
            return Err(Error::Config(
                "progress_interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Default answers configured for a migrator (name matched case-insensitively).
    #[must_use]
    pub fn answers_for(&self, migrator: &str) -> Option<&HashMap<String, String>> {
        self.answers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(migrator))
            .map(|(_, answers)| answers)
    }
}

/// Typed MongoDB connection settings collected from the prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// User name, empty for unauthenticated access.
    pub user: String,
    /// Password; credentials are only sent when it is non-empty.
    pub password: String,
    /// Database holding the `users` and `banks` collections.
    pub database: String,
}

impl ConnectionSettings {
    /// Builds settings from the `dbHost`, `dbPort`, `dbUser`, `dbPass` and
    /// `dbDB` answers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a missing answer, an empty host or
    /// database, or a port that is not a valid `u16`.
    pub fn from_answers(answers: &Answers) -> Result<Self> {
        let host = answers.require("dbHost")?.trim().to_string();
        let port_text = answers.require("dbPort")?.trim();
        let port = port_text
            .parse::<u16>()
            .map_err(|_| Error::Config(format!("invalid port '{}'", port_text)))?;
        let database = answers.require("dbDB")?.trim().to_string();

        if host.is_empty() {
            return Err(Error::Config("database host cannot be empty".to_string()));
        }
        if database.is_empty() {
            return Err(Error::Config("database name cannot be empty".to_string()));
        }

        Ok(Self {
            host,
            port,
            user: answers.require("dbUser")?.to_string(),
            password: answers.require("dbPass")?.to_string(),
            database,
        })
    }

    /// Whether credentials should be sent.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.password.is_empty()
    }
}
