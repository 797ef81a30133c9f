//! Session store configuration.

use std::time::Duration;

/// Storage key of the persisted session record.
pub const DEFAULT_STORAGE_KEY: &str = "user";
/// Inactivity budget after which the store forces a logout.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
/// Simulated backend round-trip for login/register.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);
/// Password accepted for every identity in the mock directory.
pub const DEMO_PASSWORD: &str = "123456";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Key the persisted identity is stored under.
    pub storage_key: String,
    /// Time after a successful restore/login/register before forced logout.
    pub idle_timeout: Duration,
    /// Artificial delay applied by [`crate::backend::WithLatency`].
    pub latency: Duration,
    /// Shared password of the mock directory.
    pub demo_password: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            latency: DEFAULT_LATENCY,
            demo_password: DEMO_PASSWORD.to_owned(),
        }
    }
}
