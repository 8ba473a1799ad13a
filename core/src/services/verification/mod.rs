//! Verification flow module for carrier-backed number verification
//!
//! This module drives the three-step authorization code exchange:
//! - Initiate: create a session and hand back the provider authorization URL
//! - Complete: validate the callback state and exchange the code for a credential
//! - Verify: check a phone number against the carrier using the stored credential

mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::VerificationFlowController;
pub use traits::IdentityProviderTrait;
pub use types::{CompleteResult, InitiateResult, ProviderToken, VerificationResult};
