//! Verification flow controller implementation

use std::sync::Arc;

use nv_shared::utils::phone::mask_phone_number;

use crate::domain::entities::verification_session::{Credential, RequestMetadata};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::session::SessionStore;
use crate::services::session::{SessionLifecycleConfig, SessionLifecycleManager};

use super::traits::IdentityProviderTrait;
use super::types::{CompleteResult, InitiateResult, VerificationResult};

/// Orchestrates initiate → callback → verify against the session store and
/// the identity provider
///
/// Holds no per-flow state of its own; every step re-reads the session by its
/// correlation token.
pub struct VerificationFlowController<S: SessionStore, P: IdentityProviderTrait> {
    /// Session lifecycle rules on top of the store
    sessions: SessionLifecycleManager<S>,
    /// External identity provider
    provider: Arc<P>,
}

impl<S: SessionStore, P: IdentityProviderTrait> VerificationFlowController<S, P> {
    /// Create a new flow controller
    ///
    /// # Arguments
    ///
    /// * `store` - Session store implementation
    /// * `provider` - Identity provider implementation
    /// * `config` - Session lifecycle configuration
    pub fn new(store: Arc<S>, provider: Arc<P>, config: SessionLifecycleConfig) -> Self {
        Self {
            sessions: SessionLifecycleManager::new(store, config),
            provider,
        }
    }

    /// Start a verification and return the provider authorization URL
    ///
    /// # Arguments
    ///
    /// * `requested_token` - Client-supplied state, generated when absent or empty
    /// * `phone_number` - Number to verify, if known up front
    /// * `request_metadata` - Snapshot of the initiating request
    ///
    /// # Returns
    ///
    /// * `Ok(InitiateResult)` - Session token and redirect URL
    /// * `Err(DomainError::DuplicateToken)` - The requested state is already live
    /// * `Err(DomainError::Provider)` - The authorization URL could not be built
    pub async fn initiate(
        &self,
        requested_token: Option<&str>,
        phone_number: Option<&str>,
        request_metadata: RequestMetadata,
    ) -> DomainResult<InitiateResult> {
        let phone_number = phone_number
            .filter(|number| !number.is_empty())
            .map(str::to_string);

        if let Some(number) = &phone_number {
            tracing::info!(
                phone = %mask_phone_number(number),
                event = "verification_initiate",
                "Initiating number verification"
            );
        }

        let session = self
            .sessions
            .initiate(requested_token, phone_number, request_metadata)
            .await?;
        let token = session.correlation_token;

        let redirect_url = match self.provider.build_authorization_url(&token) {
            Ok(url) => url,
            Err(message) => {
                tracing::error!(
                    error = %message,
                    event = "authorization_url_failed",
                    "Failed to build provider authorization URL"
                );
                // Nobody can reach the callback without a URL
                self.sessions.invalidate(&token).await?;
                return Err(DomainError::provider(message));
            }
        };

        tracing::debug!(redirect_url = %redirect_url, "Built provider authorization URL");

        Ok(InitiateResult {
            correlation_token: token,
            redirect_url,
        })
    }

    /// Handle the provider callback and exchange the code for a credential
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the provider redirect
    /// * `state` - State value from the provider redirect
    ///
    /// # Returns
    ///
    /// * `Ok(CompleteResult)` - Credential and the token for later requests
    /// * `Err(DomainError::NotFound)` - No live session for `state`
    /// * `Err(DomainError::StateMismatch)` - `state` does not match the session's token
    /// * `Err(DomainError::AlreadyAuthorized)` - The callback was already completed
    /// * `Err(DomainError::Provider)` - The code exchange failed
    pub async fn complete(&self, code: &str, state: &str) -> DomainResult<CompleteResult> {
        if code.is_empty() {
            return Err(DomainError::validation("Authorization code is required"));
        }

        let session = self.sessions.lookup(state).await.map_err(|error| {
            tracing::warn!(event = "callback_unknown_state", "Callback for unknown verification request");
            error
        })?;

        if !session.matches_state(state) {
            tracing::warn!(event = "callback_state_mismatch", "Callback state does not match session");
            return Err(DomainError::StateMismatch);
        }

        // Don't burn the code on a session that can no longer transition
        if session.is_authorized() {
            return Err(DomainError::AlreadyAuthorized);
        }

        let token = self
            .provider
            .exchange_code_for_token(code)
            .await
            .map_err(|message| {
                tracing::error!(
                    error = %message,
                    event = "code_exchange_failed",
                    "Provider code exchange failed"
                );
                DomainError::provider(message)
            })?;

        let session = self
            .sessions
            .authorize(
                &session.correlation_token,
                Credential::new(token.access_token.clone(), token.expires_in_ms),
            )
            .await?;

        Ok(CompleteResult {
            correlation_token: session.correlation_token,
            access_token: token.access_token,
            expires_in_ms: token.expires_in_ms,
        })
    }

    /// Verify a phone number using the session's credential
    ///
    /// When `phone_number` is absent or empty the number recorded at
    /// initiation is used.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationResult)` - Provider result, unmodified
    /// * `Err(DomainError::NotFound)` - No live session for `token`
    /// * `Err(DomainError::Unauthorized)` - The callback step has not completed
    /// * `Err(DomainError::Validation)` - No phone number available
    /// * `Err(DomainError::Provider)` - The provider call failed
    pub async fn verify(
        &self,
        token: &str,
        phone_number: Option<&str>,
    ) -> DomainResult<VerificationResult> {
        let session = self.sessions.require_authorized(token).await?;

        let number = phone_number
            .filter(|number| !number.is_empty())
            .map(str::to_string)
            .or_else(|| session.phone_number.clone())
            .ok_or_else(|| DomainError::validation("Phone number is required"))?;

        let credential = session.credential().ok_or(DomainError::Unauthorized)?;

        tracing::info!(
            phone = %mask_phone_number(&number),
            event = "verify_number",
            "Verifying phone number with provider"
        );

        self.provider
            .verify_number(&credential.access_token, &number)
            .await
            .map_err(|message| {
                tracing::error!(
                    phone = %mask_phone_number(&number),
                    error = %message,
                    event = "verify_number_failed",
                    "Provider number verification failed"
                );
                DomainError::provider(message)
            })
    }

    /// Number of live verification sessions
    pub async fn live_sessions(&self) -> usize {
        self.sessions.live_sessions().await
    }
}
