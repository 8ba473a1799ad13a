//! In-memory session store with per-token eviction timers

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::entities::verification_session::VerificationSession;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::{SessionMutator, SessionStore};

/// Pending eviction for one token
struct EvictionTimer {
    /// Identifies this schedule; a firing timer only deletes if it is still current
    generation: u64,
    handle: JoinHandle<()>,
}

struct SessionSlot {
    session: VerificationSession,
    eviction: Option<EvictionTimer>,
}

impl SessionSlot {
    fn cancel_eviction(&mut self) {
        if let Some(timer) = self.eviction.take() {
            timer.handle.abort();
        }
    }
}

type SessionTable = Arc<Mutex<HashMap<String, SessionSlot>>>;

/// Process-local session store
///
/// All operations take the table lock for the duration of a single
/// synchronous critical section, which serializes every access to a given
/// token (and, incidentally, across tokens). The lock is never held across
/// calls to other components.
///
/// Eviction timers are tokio tasks, so the store must be used from within a
/// tokio runtime.
pub struct InMemorySessionStore {
    table: SessionTable,
    next_generation: AtomicU64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Whether an eviction is currently pending for `token`
    pub async fn has_pending_eviction(&self, token: &str) -> bool {
        let table = self.table.lock().await;
        table
            .get(token)
            .map(|slot| slot.eviction.is_some())
            .unwrap_or(false)
    }

    /// Replace the slot's timer; the caller holds the table lock
    fn arm_eviction(&self, slot: &mut SessionSlot, token: &str, delay: Duration) {
        slot.cancel_eviction();

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let handle = Self::spawn_eviction(self.table.clone(), token.to_string(), generation, delay);
        slot.eviction = Some(EvictionTimer { generation, handle });

        tracing::debug!(
            event = "eviction_scheduled",
            delay_ms = delay.as_millis() as u64,
            generation = generation
        );
    }

    fn spawn_eviction(
        table: SessionTable,
        token: String,
        generation: u64,
        delay: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut table = table.lock().await;
            let is_current = table
                .get(&token)
                .and_then(|slot| slot.eviction.as_ref())
                .map(|timer| timer.generation == generation)
                .unwrap_or(false);

            if !is_current {
                // Superseded by a later schedule or the session is already gone
                return;
            }

            if let Some(slot) = table.remove(&token) {
                tracing::info!(
                    event = "session_evicted",
                    status = ?slot.session.status(),
                    delay_ms = delay.as_millis() as u64,
                    "Verification session evicted"
                );
            }
        })
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InMemorySessionStore {
    fn drop(&mut self) {
        // Timers hold the table alive; stop them with the store.
        if let Ok(mut table) = self.table.try_lock() {
            for slot in table.values_mut() {
                slot.cancel_eviction();
            }
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: VerificationSession) -> DomainResult<VerificationSession> {
        let mut table = self.table.lock().await;

        if table.contains_key(&session.correlation_token) {
            tracing::warn!(event = "duplicate_state", "Rejected duplicate verification state");
            return Err(DomainError::DuplicateToken);
        }

        table.insert(
            session.correlation_token.clone(),
            SessionSlot {
                session: session.clone(),
                eviction: None,
            },
        );

        tracing::debug!(event = "session_created", live_sessions = table.len());
        Ok(session)
    }

    async fn get(&self, token: &str) -> DomainResult<VerificationSession> {
        let table = self.table.lock().await;
        table
            .get(token)
            .map(|slot| slot.session.clone())
            .ok_or(DomainError::NotFound)
    }

    async fn update(
        &self,
        token: &str,
        mutator: SessionMutator,
    ) -> DomainResult<VerificationSession> {
        let mut table = self.table.lock().await;
        let slot = table.get_mut(token).ok_or(DomainError::NotFound)?;

        // Mutate a copy so a rejected change leaves the record as it was
        let mut updated = slot.session.clone();
        mutator(&mut updated)?;
        slot.session = updated.clone();

        Ok(updated)
    }

    async fn update_and_reschedule(
        &self,
        token: &str,
        mutator: SessionMutator,
        delay: Duration,
    ) -> DomainResult<VerificationSession> {
        let mut table = self.table.lock().await;
        let slot = table.get_mut(token).ok_or(DomainError::NotFound)?;

        let mut updated = slot.session.clone();
        mutator(&mut updated)?;
        slot.session = updated.clone();
        self.arm_eviction(slot, token, delay);

        Ok(updated)
    }

    async fn schedule_eviction(&self, token: &str, delay: Duration) -> DomainResult<()> {
        let mut table = self.table.lock().await;
        let slot = table.get_mut(token).ok_or(DomainError::NotFound)?;

        self.arm_eviction(slot, token, delay);
        Ok(())
    }

    async fn delete(&self, token: &str) -> DomainResult<Option<VerificationSession>> {
        let mut table = self.table.lock().await;

        Ok(table.remove(token).map(|mut slot| {
            slot.cancel_eviction();
            let mut session = slot.session;
            session.expire();
            tracing::debug!(event = "session_deleted", live_sessions = table.len());
            session
        }))
    }

    async fn len(&self) -> usize {
        self.table.lock().await.len()
    }
}
