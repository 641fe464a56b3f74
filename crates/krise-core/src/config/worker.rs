//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether scheduled jobs run in this process.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Cron expression for the daily storage-expiry scan.
    #[serde(default = "default_expiry_cron")]
    pub expiry_cron: String,
    /// How many days ahead of expiry an item triggers a notification.
    #[serde(default = "default_expiry_window_days")]
    pub expiry_window_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            expiry_cron: default_expiry_cron(),
            expiry_window_days: default_expiry_window_days(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_expiry_cron() -> String {
    // Every day at 08:00.
    "0 0 8 * * *".to_string()
}

fn default_expiry_window_days() -> i64 {
    7
}
