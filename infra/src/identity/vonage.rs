//! Vonage Network Number Verification Implementation
//!
//! This module talks to the Vonage network APIs on behalf of the flow
//! controller. It implements the `IdentityProviderTrait` from the core crate.
//!
//! ## Flow
//!
//! - The authorization URL points the device at the Vonage OIDC endpoint,
//!   which authenticates it over the mobile network and redirects back with
//!   `code` and `state`
//! - The code is exchanged at the token endpoint, authenticated with an
//!   application JWT signed by the application's private key (RS256)
//! - The resulting access token is used against the CAMARA number
//!   verification endpoint
//!
//! No retries are performed here; failures are reported to the caller.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, Header};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

use nv_core::services::verification::{IdentityProviderTrait, ProviderToken, VerificationResult};
use nv_shared::config::ProviderConfig;
use nv_shared::utils::phone::mask_phone_number;

use super::keys::ApplicationKey;
use crate::InfrastructureError;

/// OIDC scope granting number verification
pub const NUMBER_VERIFICATION_SCOPE: &str =
    "openid dpv:FraudPreventionAndDetection#number-verification-verify-read";

/// Path of the number verification endpoint under the API base URL
pub const VERIFY_PATH: &str = "/camara/number-verification/v031/verify";

/// Lifetime of application JWTs in seconds
const APPLICATION_JWT_TTL_SECONDS: i64 = 900;

/// Token lifetime assumed when the provider omits `expires_in`
const DEFAULT_TOKEN_LIFETIME_SECONDS: u64 = 300;

/// Vonage provider configuration
#[derive(Debug, Clone)]
pub struct VonageConfig {
    /// Vonage application id
    pub application_id: String,
    /// Key used to sign application JWTs
    pub private_key: ApplicationKey,
    /// Callback URL registered with the application
    pub redirect_uri: String,
    /// Network API base URL (token exchange, number verification)
    pub api_base_url: String,
    /// OIDC base URL (authorization endpoint)
    pub oidc_base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl VonageConfig {
    /// Build from the shared provider configuration, reading the private key once
    pub fn from_provider_config(
        config: &ProviderConfig,
        redirect_uri: String,
    ) -> Result<Self, InfrastructureError> {
        if config.application_id.is_empty() {
            return Err(InfrastructureError::Config(
                "VONAGE_APPLICATION_ID not set".to_string(),
            ));
        }

        let key_path = config.private_key_path.as_ref().ok_or_else(|| {
            InfrastructureError::Config("VONAGE_APPLICATION_PRIVATE_KEY not set".to_string())
        })?;

        Ok(Self {
            application_id: config.application_id.clone(),
            private_key: ApplicationKey::from_file(key_path)?,
            redirect_uri,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            oidc_base_url: config.oidc_base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: config.request_timeout_secs,
        })
    }
}

/// Claims of the application JWT authenticating token requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationClaims {
    pub application_id: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Seconds until expiry
    expires_in: Option<u64>,
}

/// Vonage identity provider
pub struct VonageIdentityProvider {
    client: Client,
    config: VonageConfig,
}

impl VonageIdentityProvider {
    /// Create a new Vonage provider
    pub fn new(config: VonageConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            application_id = %config.application_id,
            redirect_uri = %config.redirect_uri,
            "Vonage identity provider initialized"
        );

        Ok(Self { client, config })
    }

    /// Sign a short-lived application JWT
    pub fn application_jwt(&self) -> Result<String, InfrastructureError> {
        let now = Utc::now().timestamp();
        let claims = ApplicationClaims {
            application_id: self.config.application_id.clone(),
            iat: now,
            exp: now + APPLICATION_JWT_TTL_SECONDS,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::new(Algorithm::RS256),
            &claims,
            self.config.private_key.encoding_key(),
        )?)
    }

    fn authorization_url(&self, correlation_token: &str) -> Result<Url, InfrastructureError> {
        Url::parse_with_params(
            &format!("{}/oauth2/auth", self.config.oidc_base_url),
            &[
                ("client_id", self.config.application_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", NUMBER_VERIFICATION_SCOPE),
                ("state", correlation_token),
            ],
        )
        .map_err(|e| InfrastructureError::Config(format!("Invalid OIDC base URL: {}", e)))
    }

    async fn request_token(&self, code: &str) -> Result<ProviderToken, InfrastructureError> {
        let url = format!("{}/oauth2/token", self.config.api_base_url);
        let jwt = self.application_jwt()?;

        debug!(url = %url, "Exchanging authorization code");

        let response = self
            .client
            .post(&url)
            .bearer_auth(jwt)
            .form(&[
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Provider(format!(
                "Token exchange failed with HTTP {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await?;
        let expires_in_seconds = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECONDS);

        Ok(ProviderToken {
            access_token: token.access_token,
            expires_in_ms: expires_in_seconds.saturating_mul(1000),
        })
    }

    async fn request_verification(
        &self,
        access_token: &str,
        phone_number: &str,
    ) -> Result<VerificationResult, InfrastructureError> {
        let url = format!("{}{}", self.config.api_base_url, VERIFY_PATH);

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "phoneNumber": phone_number }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(InfrastructureError::Provider(
                "Access token rejected by number verification API".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Provider(format!(
                "Number verification failed with HTTP {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl IdentityProviderTrait for VonageIdentityProvider {
    fn build_authorization_url(&self, correlation_token: &str) -> Result<String, String> {
        self.authorization_url(correlation_token)
            .map(String::from)
            .map_err(|e| e.to_string())
    }

    async fn exchange_code_for_token(&self, code: &str) -> Result<ProviderToken, String> {
        match self.request_token(code).await {
            Ok(token) => {
                info!(
                    expires_in_ms = token.expires_in_ms,
                    "Exchanged authorization code with Vonage"
                );
                Ok(token)
            }
            Err(e) => {
                error!("Vonage code exchange failed: {}", e);
                Err(e.to_string())
            }
        }
    }

    async fn verify_number(
        &self,
        access_token: &str,
        phone_number: &str,
    ) -> Result<VerificationResult, String> {
        match self.request_verification(access_token, phone_number).await {
            Ok(result) => {
                info!(
                    phone = %mask_phone_number(phone_number),
                    "Vonage number verification completed"
                );
                Ok(result)
            }
            Err(e) => {
                error!(
                    phone = %mask_phone_number(phone_number),
                    "Vonage number verification failed: {}",
                    e
                );
                Err(e.to_string())
            }
        }
    }
}
