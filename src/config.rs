//! Configuration Module
//!
//! Server settings loaded from environment variables. Cache budgets are
//! never configured here; they are fixed per cache in the registry.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port for the admin API
    pub server_port: u16,
    /// Seconds between metrics log reports, 0 disables them
    pub metrics_log_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `METRICS_LOG_INTERVAL` - Metrics report frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            metrics_log_interval: parse_var("METRICS_LOG_INTERVAL")
                .unwrap_or(defaults.metrics_log_interval),
        }
    }

    /// Whether the periodic metrics report should run.
    pub fn metrics_report_enabled(&self) -> bool {
        self.metrics_log_interval > 0
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            metrics_log_interval: 60,
        }
    }
}
