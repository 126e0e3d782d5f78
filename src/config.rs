//! Environment-driven configuration.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file by the binary):
//!
//! | Variable | Default |
//! |---|---|
//! | `DASHBOARD_DATASET` | [`DEFAULT_DATASET_URL`] |
//! | `DASHBOARD_HTTP_TIMEOUT_SECS` | `30` |
//! | `LOG_FILE_PATH` | `logs/bike_share_dashboard.log` |

use std::time::Duration;

pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/ericaishere/bike-sharing-data-analysis/main/dashboard/bikesharing_df.csv";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/bike_share_dashboard.log";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub dataset_source: String,
    pub http_timeout: Duration,
    pub log_file_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_source: DEFAULT_DATASET_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_file_path: DEFAULT_LOG_FILE_PATH.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset, empty or
    /// unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            dataset_source: get("DASHBOARD_DATASET").unwrap_or(defaults.dataset_source),
            http_timeout: get("DASHBOARD_HTTP_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            log_file_path: get("LOG_FILE_PATH").unwrap_or(defaults.log_file_path),
        }
    }
}
