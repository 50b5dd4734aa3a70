//! Console result banners.

use console::{style, Style};

use crate::pipeline::MigrationStats;

/// Prints the result of a migration run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleUi;

impl ConsoleUi {
    /// Prints the banner shown before the questions.
    pub fn print_header(&self, migrator: &str, description: &str) {
        let cyan = Style::new().cyan().bold();
        println!();
        println!("{} {}", cyan.apply_to("Migrator:"), migrator);
        println!("{}", style(description).dim());
        println!();
    }

    /// Prints success message with stats.
    pub fn print_success(&self, stats: &MigrationStats, dry_run: bool) {
        let green = Style::new().green().bold();
        let bold = Style::new().bold();

        println!();
        if dry_run {
            println!("{}", green.apply_to("✅ Dry run complete (nothing written)"));
        } else {
            println!("{}", green.apply_to("✅ Migration complete!"));
        }
        println!();
        println!("   {} {}", bold.apply_to("Scanned: "), stats.scanned);
        println!("   {} {}", bold.apply_to("Migrated:"), stats.migrated);
        println!("   {} {}", bold.apply_to("Written: "), stats.written);
        println!(
            "   {} {:.1}s",
            bold.apply_to("Duration:"),
            stats.duration_secs
        );
        if stats.empty > 0 {
            println!("   {} {}", style("Empty:   ").dim(), stats.empty);
        }
        if stats.skipped > 0 {
            println!(
                "   {} {} (see warnings above)",
                style("Skipped: ").yellow(),
                stats.skipped
            );
        }
        println!();
    }

    /// Prints error message.
    pub fn print_error(&self, message: &str) {
        println!();
        println!("{} {}", style("❌").red().bold(), message);
    }
}
