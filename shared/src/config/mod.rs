//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `provider` - Identity provider (carrier network API) credentials and endpoints
//! - `server` - HTTP server configuration
//! - `session` - Verification session lifetimes

pub mod environment;
pub mod provider;
pub mod server;
pub mod session;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use provider::{ProviderConfig, ProviderKind};
pub use server::ServerConfig;
pub use session::SessionConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Identity provider configuration
    pub provider: ProviderConfig,

    /// Session lifetime configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            provider: ProviderConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Callers are expected to have loaded any `.env` file beforehand.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            provider: ProviderConfig::from_env(),
            session: SessionConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Redirect URI registered with the identity provider
    ///
    /// Falls back to the local callback route when `REDIRECT_URL` is not set.
    pub fn redirect_url(&self) -> String {
        self.provider
            .redirect_url
            .clone()
            .unwrap_or_else(|| format!("https://localhost:{}/step2", self.server.port))
    }
}
