//! Verification session entity for carrier-backed number verification.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::{DomainError, DomainResult};

/// Snapshot of the initiating request (headers and similar), opaque to the core
pub type RequestMetadata = HashMap<String, String>;

/// Lifecycle status of a verification session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created, waiting for the identity provider callback
    Initiated,
    /// Code exchanged, credential attached
    Authorized,
    /// Removed from the store; only ever observed on records handed back by deletion
    Expired,
}

/// Short-lived access credential obtained by exchanging an authorization code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Provider access token used for number verification calls
    pub access_token: String,
    /// Lifetime of the token in milliseconds, counted from the exchange
    pub expires_in_ms: u64,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, expires_in_ms: u64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in_ms,
        }
    }

    /// Lifetime as a duration from now
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.expires_in_ms)
    }
}

/// A single verification attempt, keyed by its correlation token
///
/// `credential` and `status` are private so that a credential can only
/// appear through [`VerificationSession::authorize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Correlation token, doubling as the OAuth `state` value
    pub correlation_token: String,

    /// Number to verify, if the client supplied it when initiating
    pub phone_number: Option<String>,

    /// Snapshot of the initiating request
    pub request_metadata: RequestMetadata,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the callback step succeeded
    pub authorized_at: Option<DateTime<Utc>>,

    credential: Option<Credential>,
    status: SessionStatus,
}

impl VerificationSession {
    /// Creates a new session in `Initiated` status
    pub fn new(
        correlation_token: impl Into<String>,
        phone_number: Option<String>,
        request_metadata: RequestMetadata,
    ) -> Self {
        Self {
            correlation_token: correlation_token.into(),
            phone_number,
            request_metadata,
            created_at: Utc::now(),
            authorized_at: None,
            credential: None,
            status: SessionStatus::Initiated,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_authorized(&self) -> bool {
        self.status == SessionStatus::Authorized
    }

    /// Compares a presented `state` against this session's token in constant time
    pub fn matches_state(&self, presented: &str) -> bool {
        let stored = self.correlation_token.as_bytes();
        let presented = presented.as_bytes();
        stored.len() == presented.len() && constant_time_eq(stored, presented)
    }

    /// Attaches the credential and moves the session to `Authorized`
    ///
    /// # Errors
    ///
    /// * `DomainError::AlreadyAuthorized` - the session already completed the callback
    /// * `DomainError::NotFound` - the session has expired
    pub fn authorize(&mut self, credential: Credential) -> DomainResult<()> {
        match self.status {
            SessionStatus::Initiated => {
                self.credential = Some(credential);
                self.status = SessionStatus::Authorized;
                self.authorized_at = Some(Utc::now());
                Ok(())
            }
            SessionStatus::Authorized => Err(DomainError::AlreadyAuthorized),
            SessionStatus::Expired => Err(DomainError::NotFound),
        }
    }

    /// Moves the session to `Expired`, dropping its credential
    pub fn expire(&mut self) {
        self.status = SessionStatus::Expired;
        self.credential = None;
    }

    /// Wall-clock instant at which the credential lapses
    pub fn credential_expires_at(&self) -> Option<DateTime<Utc>> {
        let authorized_at = self.authorized_at?;
        let credential = self.credential.as_ref()?;
        let lifetime = ChronoDuration::milliseconds(
            i64::try_from(credential.expires_in_ms).unwrap_or(i64::MAX),
        );
        authorized_at.checked_add_signed(lifetime)
    }

    /// Whether the credential has lapsed at `now`; sessions without one never lapse
    pub fn credential_expired(&self, now: DateTime<Utc>) -> bool {
        self.credential_expires_at()
            .map(|expires_at| expires_at <= now)
            .unwrap_or(false)
    }
}
