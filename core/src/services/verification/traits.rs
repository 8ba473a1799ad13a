//! Trait for identity provider integration

use async_trait::async_trait;

use super::types::{ProviderToken, VerificationResult};

/// External identity/carrier provider performing the actual verification
///
/// Errors are plain messages and are surfaced to callers unmodified.
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Build the authorization URL the end user is redirected to
    fn build_authorization_url(&self, correlation_token: &str) -> Result<String, String>;
    /// Exchange an authorization code for an access token
    async fn exchange_code_for_token(&self, code: &str) -> Result<ProviderToken, String>;
    /// Check whether `phone_number` belongs to the session behind `access_token`
    async fn verify_number(
        &self,
        access_token: &str,
        phone_number: &str,
    ) -> Result<VerificationResult, String>;
}

/// Lets a runtime-selected provider (`Box<dyn IdentityProviderTrait>`) drive the flow
#[async_trait]
impl<T: IdentityProviderTrait + ?Sized> IdentityProviderTrait for Box<T> {
    fn build_authorization_url(&self, correlation_token: &str) -> Result<String, String> {
        (**self).build_authorization_url(correlation_token)
    }

    async fn exchange_code_for_token(&self, code: &str) -> Result<ProviderToken, String> {
        (**self).exchange_code_for_token(code).await
    }

    async fn verify_number(
        &self,
        access_token: &str,
        phone_number: &str,
    ) -> Result<VerificationResult, String> {
        (**self).verify_number(access_token, phone_number).await
    }
}
