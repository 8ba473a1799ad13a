//! Business services containing the verification flow logic.

pub mod session;
pub mod verification;

// Re-export commonly used types
pub use session::{SessionLifecycleConfig, SessionLifecycleManager};
pub use verification::{
    CompleteResult, IdentityProviderTrait, InitiateResult, ProviderToken,
    VerificationFlowController, VerificationResult,
};
