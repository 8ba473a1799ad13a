//! Types for verification flow results

use serde::{Deserialize, Serialize};

/// Provider-defined verification outcome, passed through verbatim
pub type VerificationResult = serde_json::Value;

/// Token returned by the provider's code exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderToken {
    pub access_token: String,
    /// Milliseconds until the token expires, counted from the exchange
    pub expires_in_ms: u64,
}

/// Result of initiating a verification
#[derive(Debug, Clone)]
pub struct InitiateResult {
    /// Correlation token bound to the new session
    pub correlation_token: String,
    /// Provider authorization URL the client should redirect to
    pub redirect_url: String,
}

/// Result of completing the provider callback
#[derive(Debug, Clone)]
pub struct CompleteResult {
    /// Correlation token the client presents on later requests
    pub correlation_token: String,
    pub access_token: String,
    pub expires_in_ms: u64,
}
