//! Route handlers
//!
//! - `health`: liveness probe
//! - `verification`: the three-step number verification flow

pub mod health;
pub mod verification;

use std::sync::Arc;

use nv_core::repositories::SessionStore;
use nv_core::services::{IdentityProviderTrait, VerificationFlowController};

/// Application state that holds shared services
pub struct AppState<S, P>
where
    S: SessionStore,
    P: IdentityProviderTrait,
{
    pub flow: Arc<VerificationFlowController<S, P>>,
}

impl<S, P> AppState<S, P>
where
    S: SessionStore,
    P: IdentityProviderTrait,
{
    pub fn new(flow: VerificationFlowController<S, P>) -> Self {
        Self {
            flow: Arc::new(flow),
        }
    }
}
