//! Permission groups, chat meta and balances to the `users` collection.
//!
//! Groups and chat meta come from the permissions plugin's per-world
//! `users.yml`; names and balances from the economy plugin's per-player
//! userdata files.

use async_trait::async_trait;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{ConnectionSettings, MigrationOptions};
use crate::error::{Error, Result};
use crate::pipeline::{MigrationStats, Progress};
use crate::prompt::ui::ConsoleUi;
use crate::prompt::{Answers, Asker, Question};
use crate::registry::{MigrationContext, Migrator};
use crate::store::{DocumentStore, MemoryStore, MongoStore};
use crate::writer::{RecordWriter, UserRecord};

use super::{database_questions, report};

/// A permissions `users.yml` file.
#[derive(Debug, Default, Deserialize)]
pub struct PermissionFile {
    /// Entries keyed by player UUID; absent in malformed files. A player
    /// without any data is written as a bare key.
    #[serde(default)]
    pub users: Option<BTreeMap<String, Option<PermissionEntry>>>,
}

/// Permission data of one player.
#[derive(Debug, Default, Deserialize)]
pub struct PermissionEntry {
    /// Group names.
    #[serde(default)]
    pub groups: Option<Vec<String>>,
    /// Chat meta.
    #[serde(default)]
    pub meta: Option<PermissionMeta>,
}

/// Chat prefix and suffix.
#[derive(Debug, Default, Deserialize)]
pub struct PermissionMeta {
    /// Chat prefix.
    pub prefix: Option<String>,
    /// Chat suffix.
    pub suffix: Option<String>,
}

/// An economy userdata file; only the fields migrated are read.
#[derive(Debug, Default, Deserialize)]
pub struct EconomyFile {
    /// Last name the player logged in with.
    #[serde(rename = "lastAccountName")]
    pub last_account_name: Option<String>,
    /// Balance, written either as a number or as a string.
    pub money: Option<Value>,
}

/// Where to read user data from, parsed from the answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataSources {
    /// Economy userdata folder.
    pub userdata_dir: PathBuf,
    /// Permissions plugin folder holding one directory per world.
    pub permissions_dir: PathBuf,
    /// Groups kept, matched case-insensitively.
    pub whitelist: Vec<String>,
    /// Worlds whose `users.yml` is read, in order.
    pub worlds: Vec<String>,
    /// Copy chat prefixes and suffixes.
    pub custom_meta: bool,
}

impl UserDataSources {
    /// Parses the `userData`, `bPerms`, `whitelistGroups`, `worlds` and
    /// `customMeta` answers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an answer is missing.
    pub fn from_answers(answers: &Answers) -> Result<Self> {
        Ok(Self {
            userdata_dir: PathBuf::from(answers.require("userData")?),
            permissions_dir: PathBuf::from(answers.require("bPerms")?),
            whitelist: split_list(answers.require("whitelistGroups")?),
            worlds: split_list(answers.require("worlds")?),
            custom_meta: answers.is_yes("customMeta"),
        })
    }

    fn users_file(&self, world: &str) -> PathBuf {
        self.permissions_dir.join(world).join("users.yml")
    }

    fn economy_file(&self, uuid: &str) -> PathBuf {
        self.userdata_dir.join(format!("{}.yml", uuid))
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Moves permission and economy data to the database.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserDataMigrator;

impl UserDataMigrator {
    /// Questions asked before the migration starts.
    #[must_use]
    pub fn questions() -> Vec<Question> {
        let mut questions = vec![
            Question::new(
                "userData",
                "Essentials userdata folder",
                "./plugins/Essentials/userdata",
            ),
            Question::new("bPerms", "bPermissions folder", "./plugins/bPermissions"),
            Question::new(
                "whitelistGroups",
                "User groups to whitelist",
                "hero,stone,diamond,iron",
            ),
            Question::new("worlds", "Worlds to get permission data from", "world"),
            Question::new("customMeta", "Transfer custom prefixes/suffixes", "N"),
        ];
        questions.extend(database_questions());
        questions
    }

    async fn run(&self, ctx: &mut MigrationContext) -> Result<MigrationStats> {
        ConsoleUi.print_header(self.name(), self.description());
        let asker = Asker::new(Self::questions())
            .with_defaults(ctx.config.answers_for(self.name()));
        let answers = asker.collect(ctx.prompter.as_mut())?;
        let settings = ConnectionSettings::from_answers(&answers)?;
        let sources = UserDataSources::from_answers(&answers)?;

        let options = &ctx.config.options;
        if options.dry_run {
            info!("Dry run mode - not writing to the database");
            let store = MemoryStore::new();
            migrate_users(&sources, &store, options).await
        } else {
            info!("Connecting to the database");
            let store = MongoStore::connect(&settings).await?;
            migrate_users(&sources, &store, options).await
        }
    }
}

#[async_trait]
impl Migrator for UserDataMigrator {
    fn name(&self) -> &'static str {
        "userdata"
    }

    fn description(&self) -> &'static str {
        "Moves user data from Essentials and bPermissions to the database."
    }

    async fn migrate(&self, ctx: &mut MigrationContext) -> bool {
        let dry_run = ctx.config.options.dry_run;
        report(self.run(ctx).await, dry_run)
    }
}

/// Reads every configured world and upserts one user per player.
///
/// A player listed in several worlds is written once, with the data of the
/// last world read.
///
/// # Errors
///
/// Returns [`Error::Config`] if a world's `users.yml` cannot be read,
/// [`Error::Yaml`] if it is not valid YAML, and database errors from the
/// final bulk upsert.
pub async fn migrate_users<S: DocumentStore + ?Sized>(
    sources: &UserDataSources,
    store: &S,
    options: &MigrationOptions,
) -> Result<MigrationStats> {
    let start = Instant::now();
    let mut writer = RecordWriter::new(store);
    let mut progress = Progress::new(0, options.progress_interval, "users");
    let mut stats = MigrationStats::default();

    for world in &sources.worlds {
        info!("Loading permissions from world '{}'", world);
        let Some(users) = load_permissions(&sources.users_file(world))?.users else {
            warn!("Invalid user file for world {}, skipping", world);
            continue;
        };

        for (uuid, entry) in users {
            stats.scanned += 1;
            let record = user_record(sources, uuid, entry.unwrap_or_default());
            writer.push_user(&record)?;
            stats.migrated += 1;
            progress.advance();
        }
    }
    progress.finish();

    info!(
        "Executing the bulk upsert of {} users (this could take a while)",
        writer.pending_users()
    );
    let summary = writer.flush().await?;
    stats.written = summary.total();
    stats.duration_secs = start.elapsed().as_secs_f64();

    info!(
        "User data migration complete: {} users from {} worlds in {:.2}s",
        stats.migrated,
        sources.worlds.len(),
        stats.duration_secs
    );
    Ok(stats)
}

fn load_permissions(path: &Path) -> Result<PermissionFile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    if content.trim().is_empty() {
        return Ok(PermissionFile::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Builds the user document for one permissions entry.
#[must_use]
pub fn user_record(sources: &UserDataSources, uuid: String, entry: PermissionEntry) -> UserRecord {
    debug!("Getting perms for user '{}'", uuid);
    let groups = entry
        .groups
        .unwrap_or_default()
        .into_iter()
        .filter(|g| sources.whitelist.iter().any(|w| w.eq_ignore_ascii_case(g)))
        .collect();

    let (custom_prefix, custom_suffix) = match entry.meta {
        Some(meta) if sources.custom_meta => (meta.prefix, meta.suffix),
        _ => (None, None),
    };

    let economy = load_economy(&sources.economy_file(&uuid), &uuid);
    UserRecord {
        balance: balance(economy.money.as_ref(), &uuid),
        name: economy.last_account_name,
        uuid,
        groups,
        custom_prefix,
        custom_suffix,
    }
}

/// Reads an economy file; a missing or unreadable one yields defaults.
fn load_economy(path: &Path, uuid: &str) -> EconomyFile {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            debug!("No userdata file for user '{}'", uuid);
            return EconomyFile::default();
        }
    };
    serde_yaml::from_str::<Option<EconomyFile>>(&content)
        .unwrap_or_else(|e| {
            warn!("Unreadable userdata file for user '{}': {}", uuid, e);
            None
        })
        .unwrap_or_default()
}

/// Balance from a `money` value: numbers as-is, strings parsed, else 0.
fn balance(money: Option<&Value>, uuid: &str) -> f64 {
    match money {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_else(|_| {
            warn!("Unparseable balance '{}' for user '{}', using 0", s, uuid);
            0.0
        }),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(dir: &Path, custom_meta: bool) -> UserDataSources {
        UserDataSources {
            userdata_dir: dir.join("userdata"),
            permissions_dir: dir.join("perms"),
            whitelist: vec!["hero".to_string(), "iron".to_string()],
            worlds: vec!["world".to_string()],
            custom_meta,
        }
    }

    #[test]
    fn test_sources_from_answers() {
        let answers = Answers::from_pairs([
            ("userData", "./ud"),
            ("bPerms", "./bp"),
            ("whitelistGroups", "hero, stone,,iron"),
            ("worlds", "world,world_nether"),
            ("customMeta", "Y"),
        ]);
        let sources = UserDataSources::from_answers(&answers).unwrap();
        assert_eq!(sources.whitelist, ["hero", "stone", "iron"]);
        assert_eq!(sources.worlds, ["world", "world_nether"]);
        assert!(sources.custom_meta);
        assert_eq!(sources.users_file("world"), PathBuf::from("./bp/world/users.yml"));
    }

    #[test]
    fn test_balance_parsing() {
        assert_eq!(balance(Some(&Value::from(12.5)), "u"), 12.5);
        assert_eq!(balance(Some(&Value::from(7)), "u"), 7.0);
        assert_eq!(balance(Some(&Value::from("1000.25")), "u"), 1000.25);
        assert_eq!(balance(Some(&Value::from("lots")), "u"), 0.0);
        assert_eq!(balance(Some(&Value::Bool(true)), "u"), 0.0);
        assert_eq!(balance(None, "u"), 0.0);
    }

    #[test]
    fn test_groups_filtered_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let entry = PermissionEntry {
            groups: Some(vec![
                "Hero".to_string(),
                "admin".to_string(),
                "IRON".to_string(),
            ]),
            meta: Some(PermissionMeta {
                prefix: Some("&6".to_string()),
                suffix: None,
            }),
        };
        let record = user_record(&sources(dir.path(), false), "u1".to_string(), entry);
        assert_eq!(record.groups, ["Hero", "IRON"]);
        assert_eq!(record.custom_prefix, None);
        assert_eq!(record.balance, 0.0);
        assert_eq!(record.name, None);
    }

    #[test]
    fn test_custom_meta_and_economy() {
        let dir = tempfile::tempdir().unwrap();
        let sources = sources(dir.path(), true);
        std::fs::create_dir_all(&sources.userdata_dir).unwrap();
        std::fs::write(
            sources.economy_file("u1"),
            "lastAccountName: Steve\nmoney: '42.5'\n",
        )
        .unwrap();

        let entry = PermissionEntry {
            groups: None,
            meta: Some(PermissionMeta {
                prefix: Some("[VIP]".to_string()),
                suffix: Some("!".to_string()),
            }),
        };
        let record = user_record(&sources, "u1".to_string(), entry);
        assert!(record.groups.is_empty());
        assert_eq!(record.custom_prefix.as_deref(), Some("[VIP]"));
        assert_eq!(record.custom_suffix.as_deref(), Some("!"));
        assert_eq!(record.name.as_deref(), Some("Steve"));
        assert_eq!(record.balance, 42.5);
    }

    #[test]
    fn test_broken_economy_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let sources = sources(dir.path(), false);
        std::fs::create_dir_all(&sources.userdata_dir).unwrap();
        std::fs::write(sources.economy_file("u1"), "money: [unclosed\n").unwrap();

        let record = user_record(&sources, "u1".to_string(), PermissionEntry::default());
        assert_eq!(record.balance, 0.0);
        assert_eq!(record.name, None);
    }

    #[tokio::test]
    async fn test_missing_users_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let result = migrate_users(
            &sources(dir.path(), false),
            &store,
            &MigrationOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(store.bulk_writes(), 0);
    }

    #[tokio::test]
    async fn test_world_without_users_key_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let sources = sources(dir.path(), false);
        let world = sources.permissions_dir.join("world");
        std::fs::create_dir_all(&world).unwrap();
        std::fs::write(world.join("users.yml"), "groups:\n  hero: {}\n").unwrap();

        let store = MemoryStore::new();
        let stats = migrate_users(&sources, &store, &MigrationOptions::default())
            .await
            .unwrap();
        assert_eq!(stats.migrated, 0);
        assert_eq!(store.bulk_writes(), 0);
    }

    #[test]
    fn test_permission_file_with_bare_user() {
        let yaml = "users:
  abc:
  def:
    groups: [hero]
";
        let file: PermissionFile = serde_yaml::from_str(yaml).unwrap();
        let users = file.users.unwrap();
        assert!(users["abc"].is_none());
        assert_eq!(
            users["def"].as_ref().unwrap().groups.as_deref(),
            Some(&["hero".to_string()][..])
        );
    }
}
