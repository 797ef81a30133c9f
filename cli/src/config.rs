//! CLI configuration: where the session record lives and how the store behaves.
//!
//! Values arrive from flags or their `SOS_*` environment variables (clap reads
//! both); anything left unset falls back to the defaults below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use session::SessionConfig;

pub const DEFAULT_STATE_DIR: &str = ".sos-state";
pub const DEFAULT_LATENCY_MS: u64 = 1000;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub state_dir: PathBuf,
    pub session: SessionConfig,
}

impl CliConfig {
    /// Build typed config from optional overrides.
    ///
    /// - `state_dir`: default `./.sos-state`
    /// - `latency_ms`: simulated backend latency, default 1000
    /// - `idle_timeout_secs`: must be positive, default 1800
    pub fn resolve(
        state_dir: Option<PathBuf>,
        latency_ms: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let idle_secs = idle_timeout_secs.unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS);
        if idle_secs == 0 {
            return Err(ConfigError::ZeroIdleTimeout);
        }
        let session = SessionConfig {
            idle_timeout: Duration::from_secs(idle_secs),
            latency: Duration::from_millis(latency_ms.unwrap_or(DEFAULT_LATENCY_MS)),
            ..SessionConfig::default()
        };
        Ok(Self { state_dir: state_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)), session })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("SOS_IDLE_TIMEOUT_SECS must be greater than zero")]
    ZeroIdleTimeout,
}
