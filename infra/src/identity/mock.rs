//! Mock identity provider for development
//!
//! The authorization URL points straight back at the configured callback with
//! a generated code, so the whole flow can be exercised without a carrier.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;
use uuid::Uuid;

use nv_core::services::verification::{IdentityProviderTrait, ProviderToken, VerificationResult};
use nv_shared::utils::phone::{is_valid_e164, mask_phone_number};

/// Default lifetime of mock access tokens (5 minutes)
pub const DEFAULT_MOCK_TOKEN_LIFETIME_MS: u64 = 300_000;

pub struct MockIdentityProvider {
    redirect_uri: String,
    token_lifetime_ms: u64,
}

impl MockIdentityProvider {
    pub fn new(redirect_uri: impl Into<String>) -> Self {
        Self {
            redirect_uri: redirect_uri.into(),
            token_lifetime_ms: DEFAULT_MOCK_TOKEN_LIFETIME_MS,
        }
    }

    pub fn with_token_lifetime_ms(mut self, lifetime_ms: u64) -> Self {
        self.token_lifetime_ms = lifetime_ms;
        self
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    fn build_authorization_url(&self, correlation_token: &str) -> Result<String, String> {
        let code = format!("mock-code-{}", Uuid::new_v4());
        Url::parse_with_params(
            &self.redirect_uri,
            &[("code", code.as_str()), ("state", correlation_token)],
        )
        .map(String::from)
        .map_err(|e| format!("Invalid redirect URI: {}", e))
    }

    async fn exchange_code_for_token(&self, code: &str) -> Result<ProviderToken, String> {
        if !code.starts_with("mock-code-") {
            return Err("invalid_grant: unknown authorization code".to_string());
        }
        Ok(ProviderToken {
            access_token: format!("mock-token-{}", Uuid::new_v4()),
            expires_in_ms: self.token_lifetime_ms,
        })
    }

    async fn verify_number(
        &self,
        access_token: &str,
        phone_number: &str,
    ) -> Result<VerificationResult, String> {
        if !access_token.starts_with("mock-token-") {
            return Err("Access token rejected by number verification API".to_string());
        }

        tracing::info!(
            phone = %mask_phone_number(phone_number),
            "Mock number verification"
        );

        Ok(json!({ "devicePhoneNumberVerified": is_valid_e164(phone_number) }))
    }
}
