//! Recurring background jobs.
//!
//! The scheduler runs in-process next to the HTTP server. Each job carries a
//! six-field cron expression (seconds first); a job that has never run is
//! due immediately.

mod news_stats_job;
mod scheduler;

pub use news_stats_job::*;
pub use scheduler::*;

/// Common cron expressions.
pub mod cron_expressions {
    /// Every minute.
    pub const EVERY_MINUTE: &str = "0 * * * * *";
    /// Every hour, on the hour.
    pub const EVERY_HOUR: &str = "0 0 * * * *";
    /// Every day at midnight UTC.
    pub const DAILY: &str = "0 0 0 * * *";
}
