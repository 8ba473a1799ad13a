//! Configuration for the session lifecycle manager

use std::time::Duration;

use nv_shared::config::session::{SessionConfig, DEFAULT_PENDING_SESSION_TTL_SECONDS};

#[derive(Debug, Clone)]
pub struct SessionLifecycleConfig {
    /// How long an `Initiated` session waits for the provider callback
    pub pending_session_ttl: Duration,
}

impl Default for SessionLifecycleConfig {
    fn default() -> Self {
        Self {
            pending_session_ttl: Duration::from_secs(DEFAULT_PENDING_SESSION_TTL_SECONDS),
        }
    }
}

impl From<&SessionConfig> for SessionLifecycleConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            pending_session_ttl: config.pending_session_ttl(),
        }
    }
}
