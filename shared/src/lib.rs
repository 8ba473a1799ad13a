//! Shared utilities and common types for the number verification server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (phone masking and validation)
//! - Language negotiation for localized messages

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig, ProviderConfig, ProviderKind, ServerConfig,
    SessionConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::Language;
pub use utils::phone;
