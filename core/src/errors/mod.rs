//! Domain-specific error types and error handling.

use thiserror::Error;

/// Errors produced by the verification session state machine
///
/// Every variant is an expected outcome of the flow and is reported to the
/// immediate caller. Provider failures carry the collaborator's message verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("A verification request with this state already exists")]
    DuplicateToken,

    #[error("Verification request doesn't exist")]
    NotFound,

    #[error("State is incorrect")]
    StateMismatch,

    #[error("Verification request has not been authorized")]
    Unauthorized,

    #[error("Verification request has already been authorized")]
    AlreadyAuthorized,

    #[error("Identity provider error: {message}")]
    Provider { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Wrap a collaborator failure without reinterpreting it
    pub fn provider(message: impl Into<String>) -> Self {
        DomainError::Provider {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_and_state_mismatch_are_distinct() {
        assert_ne!(DomainError::NotFound, DomainError::StateMismatch);
        assert_eq!(DomainError::NotFound.to_string(), "Verification request doesn't exist");
        assert_eq!(DomainError::StateMismatch.to_string(), "State is incorrect");
    }

    #[test]
    fn test_provider_message_is_kept_verbatim() {
        let error = DomainError::provider("upstream returned 503: try later");
        assert_eq!(
            error,
            DomainError::Provider {
                message: "upstream returned 503: try later".to_string()
            }
        );
        assert!(error.to_string().ends_with("upstream returned 503: try later"));
    }
}
