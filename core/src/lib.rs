//! # Number Verification Core
//!
//! Core domain layer for the number verification backend.
//! This crate contains the verification session entity, the session store
//! interface with its in-memory implementation, the session lifecycle rules,
//! and the flow controller that drives the authorization code exchange
//! against an external identity provider.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
