//! Identity provider configuration
//!
//! Credentials and endpoints for the carrier network API that performs the
//! actual number verification. None of these values influence session
//! handling; they are passed through to the provider client.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api-eu.vonage.com";
pub const DEFAULT_OIDC_BASE_URL: &str = "https://oidc.idp.vonage.com";

/// Which identity provider implementation to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Vonage Network Number Verification API
    #[default]
    Vonage,
    /// In-process provider that approves every code (development only)
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vonage" => Ok(ProviderKind::Vonage),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(format!("Invalid identity provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider implementation
    #[serde(default)]
    pub kind: ProviderKind,

    /// Application identity registered with the provider
    pub application_id: String,

    /// Path to the PEM private key used to sign application JWTs
    pub private_key_path: Option<PathBuf>,

    /// Redirect URI registered for the authorization callback
    pub redirect_url: Option<String>,

    /// Base URL of the network APIs (token exchange and number verification)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the OIDC authorization endpoint
    #[serde(default = "default_oidc_base_url")]
    pub oidc_base_url: String,

    /// Timeout for provider HTTP requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            application_id: String::new(),
            private_key_path: None,
            redirect_url: None,
            api_base_url: default_api_base_url(),
            oidc_base_url: default_oidc_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Load provider settings from environment variables
    pub fn from_env() -> Self {
        Self {
            kind: env::var("NV_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            application_id: env::var("VONAGE_APPLICATION_ID").unwrap_or_default(),
            private_key_path: env::var("VONAGE_APPLICATION_PRIVATE_KEY").ok().map(PathBuf::from),
            redirect_url: env::var("REDIRECT_URL").ok().filter(|v| !v.is_empty()),
            api_base_url: env::var("VONAGE_API_BASE_URL").unwrap_or_else(|_| default_api_base_url()),
            oidc_base_url: env::var("VONAGE_OIDC_BASE_URL")
                .unwrap_or_else(|_| default_oidc_base_url()),
            request_timeout_secs: env::var("PROVIDER_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_oidc_base_url() -> String {
    DEFAULT_OIDC_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}
