//! Migrator registry and selection.

use async_trait::async_trait;

use crate::config::MigrationConfig;
use crate::migrators::{EnderChestMigrator, UserDataMigrator};
use crate::prompt::Prompter;

/// Everything a migrator needs from the caller.
pub struct MigrationContext {
    /// Loaded configuration with CLI overrides applied.
    pub config: MigrationConfig,
    /// Source of operator answers.
    pub prompter: Box<dyn Prompter>,
}

impl MigrationContext {
    /// Bundles a configuration and a prompter.
    #[must_use]
    pub fn new(config: MigrationConfig, prompter: Box<dyn Prompter>) -> Self {
        Self { config, prompter }
    }
}

/// A named migration.
#[async_trait]
pub trait Migrator: Send + Sync {
    /// Name used on the command line.
    fn name(&self) -> &'static str;

    /// One-line description for the listing.
    fn description(&self) -> &'static str;

    /// Runs the migration; errors are reported to the operator, not returned.
    async fn migrate(&self, ctx: &mut MigrationContext) -> bool;
}

/// Registered migrators in registration order.
#[derive(Default)]
pub struct MigratorRegistry {
    migrators: Vec<Box<dyn Migrator>>,
}

impl MigratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in migrators.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(UserDataMigrator));
        registry.register(Box::new(EnderChestMigrator));
        registry
    }

    /// Adds a migrator after the existing ones.
    pub fn register(&mut self, migrator: Box<dyn Migrator>) {
        self.migrators.push(migrator);
    }

    /// Finds a migrator by case-insensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Migrator> {
        self.migrators
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .map(|m| &**m)
    }

    /// Migrators in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Migrator> {
        self.migrators.iter().map(|m| &**m)
    }

    /// Listing with names and descriptions aligned in two columns.
    #[must_use]
    pub fn listing(&self) -> String {
        if self.migrators.is_empty() {
            return "No migrators are installed.\n".to_string();
        }
        let width = self
            .migrators
            .iter()
            .map(|m| m.name().len() + 1)
            .max()
            .unwrap_or(0);

        let mut out = String::from("Installed migrators:\n");
        for migrator in &self.migrators {
            let label = format!("{}:", migrator.name());
            out.push_str(&format!(
                "- {:<width$} {}\n",
                label,
                migrator.description(),
                width = width
            ));
        }
        out
    }
}
