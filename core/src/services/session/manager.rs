//! Session lifecycle manager implementation

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::verification_session::{
    Credential, RequestMetadata, VerificationSession,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::session::SessionStore;

use super::config::SessionLifecycleConfig;

/// Enforces the verification session state machine on top of a [`SessionStore`]
///
/// ```text
/// Initiated --authorize--> Authorized --credential lapses--> (deleted)
/// Initiated --pending TTL--> (deleted)
/// ```
pub struct SessionLifecycleManager<S: SessionStore> {
    store: Arc<S>,
    config: SessionLifecycleConfig,
}

impl<S: SessionStore> SessionLifecycleManager<S> {
    pub fn new(store: Arc<S>, config: SessionLifecycleConfig) -> Self {
        Self { store, config }
    }

    /// Create a session in `Initiated` status
    ///
    /// An absent or empty `requested_token` gets a freshly generated UUID.
    ///
    /// # Errors
    ///
    /// * `DomainError::DuplicateToken` - an explicit token collides with a live session
    pub async fn initiate(
        &self,
        requested_token: Option<&str>,
        phone_number: Option<String>,
        request_metadata: RequestMetadata,
    ) -> DomainResult<VerificationSession> {
        let client_supplied = requested_token.filter(|token| !token.is_empty());
        let token = client_supplied
            .map(str::to_string)
            .unwrap_or_else(Self::generate_token);

        let session = self
            .store
            .create(VerificationSession::new(token, phone_number, request_metadata))
            .await?;

        self.store
            .schedule_eviction(&session.correlation_token, self.config.pending_session_ttl)
            .await?;

        tracing::info!(
            event = "session_initiated",
            client_supplied_state = client_supplied.is_some(),
            pending_ttl_secs = self.config.pending_session_ttl.as_secs(),
            "Verification session initiated"
        );

        Ok(session)
    }

    /// Attach a credential to an `Initiated` session and schedule its expiry
    ///
    /// The eviction fires `credential.expires_in_ms` from now and replaces the
    /// pending-session timer.
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - no live session for `token`
    /// * `DomainError::StateMismatch` - the record stored under `token` carries another token
    /// * `DomainError::AlreadyAuthorized` - the session already completed the callback
    pub async fn authorize(
        &self,
        token: &str,
        credential: Credential,
    ) -> DomainResult<VerificationSession> {
        let lifetime = credential.lifetime();
        let expected = token.to_string();

        // Transition and timer swap happen under one store lock, so the
        // pending-session timer cannot fire between them
        let session = self
            .store
            .update_and_reschedule(
                token,
                Box::new(move |session| {
                    if !session.matches_state(&expected) {
                        return Err(DomainError::StateMismatch);
                    }
                    session.authorize(credential)
                }),
                lifetime,
            )
            .await
            .map_err(|error| {
                tracing::warn!(event = "authorize_rejected", error = %error);
                error
            })?;

        tracing::info!(
            event = "session_authorized",
            expires_in_ms = lifetime.as_millis() as u64,
            "Verification session authorized"
        );

        Ok(session)
    }

    /// Fetch a session that has completed the callback step
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - no live session for `token`
    /// * `DomainError::Unauthorized` - the session is still `Initiated`
    /// * `DomainError::NotFound` - the credential has lapsed
    pub async fn require_authorized(&self, token: &str) -> DomainResult<VerificationSession> {
        let session = self.store.get(token).await?;
        if !session.is_authorized() {
            return Err(DomainError::Unauthorized);
        }
        // The eviction timer may not have run yet
        if session.credential_expired(Utc::now()) {
            tracing::debug!(event = "credential_lapsed", "Credential lapsed before eviction");
            return Err(DomainError::NotFound);
        }
        Ok(session)
    }

    /// Fetch a live session regardless of status
    pub async fn lookup(&self, token: &str) -> DomainResult<VerificationSession> {
        self.store.get(token).await
    }

    /// Remove a session; absent tokens are ignored
    pub async fn invalidate(&self, token: &str) -> DomainResult<()> {
        if self.store.delete(token).await?.is_some() {
            tracing::info!(event = "session_invalidated", "Verification session invalidated");
        }
        Ok(())
    }

    /// Number of live sessions
    pub async fn live_sessions(&self) -> usize {
        self.store.len().await
    }

    fn generate_token() -> String {
        Uuid::new_v4().to_string()
    }
}
