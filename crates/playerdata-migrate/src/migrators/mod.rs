//! Built-in migrators.

pub mod enderchest;
pub mod userdata;

pub use enderchest::EnderChestMigrator;
pub use userdata::UserDataMigrator;

use tracing::error;

use crate::error::Result;
use crate::pipeline::MigrationStats;
use crate::prompt::ui::ConsoleUi;
use crate::prompt::Question;

/// Connection questions shared by the migrators that write to MongoDB.
pub(crate) fn database_questions() -> Vec<Question> {
    vec![
        Question::new("dbHost", "MongoDB Host", "localhost"),
        Question::new("dbPort", "MongoDB Port", "27017"),
        Question::new("dbUser", "MongoDB User", ""),
        Question::new("dbPass", "MongoDB Pass", "").secret(),
        Question::new("dbDB", "MongoDB Database", "minecraft"),
    ]
}

/// Prints the outcome of a run and turns it into the migrator's verdict.
pub(crate) fn report(outcome: Result<MigrationStats>, dry_run: bool) -> bool {
    let ui = ConsoleUi;
    match outcome {
        Ok(stats) => {
            ui.print_success(&stats, dry_run);
            true
        }
        Err(e) => {
            error!("Migration aborted: {}", e);
            ui.print_error("Migration operation failed.");
            false
        }
    }
}
