// Migration tool - pedantic lints relaxed for CLI ergonomics
#![allow(clippy::pedantic)]

//! # Player Data Migration Tool
//!
//! `playerdata-migrate` is a CLI tool and library for moving legacy Minecraft
//! server player data into MongoDB, where a server plugin reads it back.
//!
//! ## Migrators
//!
//! | Migrator | Source | Destination |
//! |----------|--------|-------------|
//! | `userdata` | Permission `users.yml` per world, economy userdata files | `users` |
//! | `enderchest` | `EnderItems` of `<uuid>.dat` player files | `banks` |
//!
//! ## Quick Start
//!
//! ```bash
//! # List migrators
//! playerdata-migrate --list-migrators
//!
//! # Run one, answering the questions interactively
//! playerdata-migrate --migrator enderchest
//!
//! # Decode and map everything without writing
//! playerdata-migrate -m enderchest --dry-run --yes
//! ```
//!
//! ## Configuration Example
//!
//! ```yaml
//! item_table:
//!   url: http://minecraft-ids.grahamedgecombe.com/items.json
//!   timeout_secs: 30
//!
//! options:
//!   progress_interval: 100
//!
//! answers:
//!   enderchest:
//!     playerData: /srv/minecraft/world/playerdata
//!     dbHost: mongo.internal
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod mapper;
pub mod migrators;
pub mod nbt;
pub mod pipeline;
pub mod prompt;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod writer;

pub use config::{ConnectionSettings, MigrationConfig, MigrationOptions};
pub use error::{Error, Result};
pub use mapper::{ItemMapper, ItemMeta, ItemRecord, MappingError};
pub use nbt::{DecodeError, Tag};
pub use pipeline::MigrationStats;
pub use prompt::{AcceptDefaults, Answers, Asker, Prompter, Question, TerminalPrompter};
pub use registry::{MigrationContext, Migrator, MigratorRegistry};
pub use resolver::{ItemResolver, ItemTable};
pub use store::{DocumentStore, MemoryStore, MongoStore};
pub use writer::{BankRecord, RecordWriter, UserRecord};
