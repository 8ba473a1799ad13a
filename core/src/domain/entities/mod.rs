//! Domain entities representing core business objects.

pub mod verification_session;

// Re-export commonly used types
pub use verification_session::{Credential, RequestMetadata, SessionStatus, VerificationSession};

#[cfg(test)]
mod tests;
