//! Player data migration CLI
//!
//! Moves legacy Minecraft server player data into MongoDB.
//! Pedantic lints relaxed for CLI ergonomics.

// CLI tool - relax pedantic lints for ergonomics
#![allow(clippy::pedantic)]

use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use playerdata_migrate::{
    AcceptDefaults, MigrationConfig, MigrationContext, MigratorRegistry, Prompter,
    TerminalPrompter,
};

#[derive(Parser)]
#[command(name = "playerdata-migrate")]
#[command(version)]
#[command(about = "Migrate legacy Minecraft player data to MongoDB", long_about = None)]
struct Cli {
    /// Runs a migrator
    #[arg(short, long, value_name = "NAME")]
    migrator: Option<String>,

    /// Lists all available migrators
    #[arg(short, long)]
    list_migrators: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "PLAYERDATA_MIGRATE_CONFIG")]
    config: Option<PathBuf>,

    /// Dry run mode (don't write to the database)
    #[arg(long)]
    dry_run: bool,

    /// Accept every default answer without prompting
    #[arg(short = 'y', long)]
    yes: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let registry = MigratorRegistry::with_builtin();

    if let Some(name) = cli.migrator.as_deref() {
        let Some(migrator) = registry.get(name) else {
            error!("Migrator '{}' not found", name);
            print!("{}", registry.listing());
            return Ok(ExitCode::FAILURE);
        };
        debug!("Found migrator {}", migrator.name());

        let mut config = match &cli.config {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                MigrationConfig::from_file(path)?
            }
            None => MigrationConfig::default(),
        };
        if cli.dry_run {
            config.options.dry_run = true;
        }
        config.validate()?;

        let prompter: Box<dyn Prompter> = if cli.yes {
            Box::new(AcceptDefaults)
        } else {
            Box::new(TerminalPrompter::new())
        };
        let mut ctx = MigrationContext::new(config, prompter);

        if migrator.migrate(&mut ctx).await {
            info!("Migration operation succeeded!");
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    } else if cli.list_migrators {
        print!("{}", registry.listing());
        Ok(ExitCode::SUCCESS)
    } else {
        Cli::command().print_help()?;
        println!();
        Ok(ExitCode::SUCCESS)
    }
}
