//! Run statistics and progress reporting shared by the migrators.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Migration statistics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MigrationStats {
    /// Source files or entries examined.
    pub scanned: u64,
    /// Entries that produced a record.
    pub migrated: u64,
    /// Entries with nothing to migrate.
    pub empty: u64,
    /// Entries skipped because they could not be decoded or mapped.
    pub skipped: u64,
    /// Documents acknowledged by the database.
    pub written: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

impl MigrationStats {
    /// Entries examined per second.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        if self.duration_secs > 0.0 {
            self.scanned as f64 / self.duration_secs
        } else {
            0.0
        }
    }
}

/// Progress bar plus a periodic log line.
pub struct Progress {
    bar: ProgressBar,
    total: u64,
    interval: u64,
    done: u64,
    unit: &'static str,
}

impl Progress {
    /// Tracks `total` entries, logging every `interval` of them.
    #[must_use]
    pub fn new(total: u64, interval: usize, unit: &'static str) -> Self {
        Self {
            bar: create_progress_bar(total),
            total,
            interval: interval.max(1) as u64,
            done: 0,
            unit,
        }
    }

    /// Records one processed entry.
    pub fn advance(&mut self) {
        self.done += 1;
        self.bar.inc(1);
        if self.done % self.interval == 0 {
            let line = progress_line(self.done, self.total, self.unit);
            self.bar.suspend(|| info!("{}", line));
        }
    }

    /// Entries processed so far.
    #[must_use]
    pub fn done(&self) -> u64 {
        self.done
    }

    /// Clears the bar.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// `(42%) Processed 420 users`; the percentage is omitted when the total is
/// unknown.
#[must_use]
pub fn progress_line(done: u64, total: u64, unit: &str) -> String {
    if total == 0 {
        format!("Processed {} {}", done, unit)
    } else {
        format!("({}%) Processed {} {}", done * 100 / total, done, unit)
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = if total > 0 {
        ProgressBar::new(total)
    } else {
        ProgressBar::new_spinner()
    };

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    pb
}
