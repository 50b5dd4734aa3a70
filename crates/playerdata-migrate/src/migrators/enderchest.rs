//! Ender chest contents from player files to the `banks` collection.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{ConnectionSettings, MigrationOptions};
use crate::error::{Error, Result};
use crate::mapper::{ItemMapper, ItemRecord, MappingError};
use crate::nbt::{self, Compound, Tag};
use crate::pipeline::{MigrationStats, Progress};
use crate::prompt::ui::ConsoleUi;
use crate::prompt::{Asker, Question};
use crate::registry::{MigrationContext, Migrator};
use crate::resolver::{ItemResolver, ItemTable};
use crate::store::{DocumentStore, MemoryStore, MongoStore};
use crate::writer::{BankRecord, RecordWriter};

use super::{database_questions, report};

const ENDER_ITEMS: &str = "EnderItems";

/// Moves ender chest contents from vanilla player files to the database.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnderChestMigrator;

impl EnderChestMigrator {
    /// Questions asked before the migration starts.
    #[must_use]
    pub fn questions() -> Vec<Question> {
        let mut questions = vec![Question::new(
            "playerData",
            "Where is the playerdata directory?",
            "./world/playerdata",
        )];
        questions.extend(database_questions());
        questions
    }

    async fn run(&self, ctx: &mut MigrationContext) -> Result<MigrationStats> {
        ConsoleUi.print_header(self.name(), self.description());
        let asker = Asker::new(Self::questions())
            .with_defaults(ctx.config.answers_for(self.name()));
        let answers = asker.collect(ctx.prompter.as_mut())?;
        let settings = ConnectionSettings::from_answers(&answers)?;
        let directory = PathBuf::from(answers.require("playerData")?);

        info!("Obtaining the list of items");
        let table = ItemResolver::new(ctx.config.item_table.clone())?
            .fetch()
            .await?;

        let options = &ctx.config.options;
        if options.dry_run {
            info!("Dry run mode - not writing to the database");
            let store = MemoryStore::new();
            migrate_directory(&directory, &table, &store, options).await
        } else {
            info!("Connecting to the database");
            let store = MongoStore::connect(&settings).await?;
            migrate_directory(&directory, &table, &store, options).await
        }
    }
}

#[async_trait]
impl Migrator for EnderChestMigrator {
    fn name(&self) -> &'static str {
        "enderchest"
    }

    fn description(&self) -> &'static str {
        "Migrates ender chest contents from player files to database banks."
    }

    async fn migrate(&self, ctx: &mut MigrationContext) -> bool {
        let dry_run = ctx.config.options.dry_run;
        report(self.run(ctx).await, dry_run)
    }
}

/// Migrates every player file in `directory` into `store`.
///
/// Files that cannot be decoded or mapped are logged and skipped; anything
/// else aborts the run.
///
/// # Errors
///
/// Returns [`Error::Config`] if `directory` is not a directory, and database
/// errors from user lookups or the final bulk insert.
pub async fn migrate_directory<S: DocumentStore + ?Sized>(
    directory: &Path,
    table: &ItemTable,
    store: &S,
    options: &MigrationOptions,
) -> Result<MigrationStats> {
    let start = Instant::now();
    if !directory.is_dir() {
        return Err(Error::Config(format!(
            "{} is not a directory",
            directory.display()
        )));
    }

    let files = player_files(directory)?;
    info!("Found {} player files in {}", files.len(), directory.display());

    let mapper = ItemMapper::new(table);
    let mut writer = RecordWriter::new(store);
    let mut progress = Progress::new(files.len() as u64, options.progress_interval, "files");
    let mut stats = MigrationStats::default();

    for (path, uuid) in &files {
        stats.scanned += 1;
        match migrate_file(path, uuid, &mapper, &mut writer).await {
            Ok(true) => stats.migrated += 1,
            Ok(false) => stats.empty += 1,
            Err(e) if e.is_file_level() => {
                warn!("Skipping player file {}: {}", path.display(), e);
                stats.skipped += 1;
            }
            Err(e) => {
                progress.finish();
                return Err(e);
            }
        }
        progress.advance();
    }
    progress.finish();

    info!(
        "Executing the bulk write of {} banks (this could take a while)",
        writer.pending_banks()
    );
    let summary = writer.flush().await?;
    stats.written = summary.total();
    stats.duration_secs = start.elapsed().as_secs_f64();

    info!(
        "Ender chest migration complete: {} migrated, {} empty, {} skipped in {:.2}s",
        stats.migrated, stats.empty, stats.skipped, stats.duration_secs
    );
    Ok(stats)
}

/// Decodes one player file and queues its bank. Returns `false` when the
/// ender chest is empty.
async fn migrate_file<S: DocumentStore + ?Sized>(
    path: &Path,
    uuid: &str,
    mapper: &ItemMapper<'_>,
    writer: &mut RecordWriter<'_, S>,
) -> Result<bool> {
    let root = nbt::read_file(path)?;
    let items = ender_items(&root, mapper)?;
    if items.is_empty() {
        debug!("Ender chest of {} is empty", uuid);
        return Ok(false);
    }

    let user = writer.user_reference(uuid).await?;
    writer.push_bank(&BankRecord { items, user })?;
    Ok(true)
}

/// Maps the `EnderItems` list of a decoded player file.
///
/// # Errors
///
/// Returns [`MappingError`] if the list is missing or mistyped, or if any
/// stack fails to map.
pub fn ender_items(
    root: &Compound,
    mapper: &ItemMapper<'_>,
) -> std::result::Result<Vec<ItemRecord>, MappingError> {
    match root.get(ENDER_ITEMS) {
        None => Err(MappingError::MissingField(ENDER_ITEMS)),
        Some(Tag::List(list)) => mapper.map_items(list),
        Some(other) => Err(MappingError::wrong_kind(ENDER_ITEMS, "List", other)),
    }
}

/// Player files in `directory`: `<uuid>.dat`, sorted by name.
///
/// # Errors
///
/// Returns an IO error if the directory cannot be listed.
pub fn player_files(directory: &Path) -> Result<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(uuid) = player_uuid(&path) {
            let uuid = uuid.to_string();
            files.push((path, uuid));
        }
    }
    files.sort();
    Ok(files)
}

/// UUID of a player file named `<uuid>.dat`.
#[must_use]
pub fn player_uuid(path: &Path) -> Option<&str> {
    if path.extension()? != "dat" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    (stem.len() == 36 && Uuid::try_parse(stem).is_ok()).then_some(stem)
}
