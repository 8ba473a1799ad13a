//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer of the number verification
//! backend. It provides concrete implementations of the identity provider
//! collaborator used by the core flow controller.
//!
//! ## Providers
//!
//! - **Vonage**: Network Number Verification API over OIDC, with application
//!   JWTs signed by the configured private key
//! - **Mock**: In-process provider that loops straight back to the callback,
//!   for local development

// Re-export core types for convenience
pub use nv_core::errors::*;

/// Identity provider module - carrier network API clients
pub mod identity;

pub use identity::{create_identity_provider, MockIdentityProvider, VonageIdentityProvider};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Private key could not be read or parsed
    #[error("Key error: {0}")]
    Key(String),

    /// Application JWT could not be signed
    #[error("Token signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Identity provider returned an error
    #[error("Identity provider error: {0}")]
    Provider(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) | InfrastructureError::Key(message) => {
                DomainError::Internal { message }
            }
            other => DomainError::Provider {
                message: other.to_string(),
            },
        }
    }
}
