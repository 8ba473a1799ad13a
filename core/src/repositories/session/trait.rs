//! Session store trait defining the interface for verification session persistence.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::verification_session::VerificationSession;
use crate::errors::DomainResult;

/// Mutation applied to a stored session under the store's serialization
///
/// Returning an error leaves the stored record untouched.
pub type SessionMutator =
    Box<dyn FnOnce(&mut VerificationSession) -> DomainResult<()> + Send + 'static>;

/// Repository trait for verification session storage
///
/// The store is the only component allowed to mutate session records. Callers
/// receive owned snapshots and must go back through the store, by correlation
/// token, for every subsequent access.
///
/// Implementations must serialize all operations on the same token so that a
/// mutation, a deletion and an eviction for one token never interleave.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session keyed by its correlation token
    ///
    /// # Returns
    /// * `Ok(VerificationSession)` - Snapshot of the stored session
    /// * `Err(DomainError::DuplicateToken)` - The token already denotes a live session
    async fn create(&self, session: VerificationSession) -> DomainResult<VerificationSession>;

    /// Fetch a snapshot of a live session
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No live session for the token
    async fn get(&self, token: &str) -> DomainResult<VerificationSession>;

    /// Apply `mutator` to the live session and return the updated snapshot
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No live session for the token
    /// * Any error returned by the mutator, with the record unchanged
    async fn update(&self, token: &str, mutator: SessionMutator)
        -> DomainResult<VerificationSession>;

    /// Apply `mutator` and, if it succeeds, replace the session's eviction
    /// with one firing after `delay`, as a single serialized operation
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No live session for the token
    /// * Any error returned by the mutator, with the record and its pending
    ///   eviction unchanged
    async fn update_and_reschedule(
        &self,
        token: &str,
        mutator: SessionMutator,
        delay: Duration,
    ) -> DomainResult<VerificationSession>;

    /// Arrange for the session to be removed after `delay`
    ///
    /// Replaces (and cancels) any eviction already pending for the token.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No live session for the token
    async fn schedule_eviction(&self, token: &str, delay: Duration) -> DomainResult<()>;

    /// Remove a session and cancel its pending eviction
    ///
    /// Idempotent: deleting an absent token returns `Ok(None)`. The returned
    /// record, if any, carries `SessionStatus::Expired`.
    async fn delete(&self, token: &str) -> DomainResult<Option<VerificationSession>>;

    /// Number of live sessions
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
