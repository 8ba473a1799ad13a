//! Verification session lifetime configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// How long an initiated session waits for its callback before eviction
pub const DEFAULT_PENDING_SESSION_TTL_SECONDS: u64 = 600;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Seconds an `Initiated` session stays live without completing the callback
    #[serde(default = "default_pending_ttl")]
    pub pending_session_ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pending_session_ttl_seconds: default_pending_ttl(),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            pending_session_ttl_seconds: env::var("PENDING_SESSION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_pending_ttl),
        }
    }

    pub fn pending_session_ttl(&self) -> Duration {
        Duration::from_secs(self.pending_session_ttl_seconds)
    }
}

fn default_pending_ttl() -> u64 {
    DEFAULT_PENDING_SESSION_TTL_SECONDS
}
