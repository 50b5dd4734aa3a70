//! Error types for playerdata-migrate.
//!
//! A single crate-wide error type. The decoder and the mapper keep their own
//! narrower errors so that per-file failures can be told apart from fatal
//! ones (see [`Error::is_file_level`]).

use thiserror::Error;

use crate::mapper::MappingError;
use crate::nbt::DecodeError;

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while migrating.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad operator input or configuration file (port, host, credentials).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The prompt could not be read from the terminal.
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// A legacy player file could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A decoded item could not be mapped to a record.
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// The remote item table could not be fetched.
    #[error("Item table error: {0}")]
    Resolution(String),

    /// Database driver error.
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// The final bulk write was rejected, fully or partially.
    #[error("Bulk write failed: {0}")]
    BulkWrite(String),

    /// A record could not be converted to a BSON document.
    #[error("Serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether this error only invalidates the file being processed.
    ///
    /// File-level errors are logged and the file is skipped; everything else
    /// aborts the migration.
    #[must_use]
    pub fn is_file_level(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Mapping(_))
    }
}
