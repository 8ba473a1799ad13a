//! Unit tests for the verification session entity

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::entities::verification_session::{
    Credential, SessionStatus, VerificationSession,
};
use crate::errors::DomainError;

fn session(token: &str) -> VerificationSession {
    let mut metadata = HashMap::new();
    metadata.insert("user-agent".to_string(), "test-agent".to_string());
    VerificationSession::new(token, Some("+15551234".to_string()), metadata)
}

#[test]
fn test_new_session_is_initiated_without_credential() {
    let session = session("state-1");

    assert_eq!(session.correlation_token, "state-1");
    assert_eq!(session.status(), SessionStatus::Initiated);
    assert!(session.credential().is_none());
    assert!(session.authorized_at.is_none());
    assert!(!session.is_authorized());
    assert_eq!(session.request_metadata["user-agent"], "test-agent");
}

#[test]
fn test_authorize_sets_credential_once() {
    let mut session = session("state-1");

    session.authorize(Credential::new("abc", 5000)).unwrap();
    assert!(session.is_authorized());
    assert_eq!(session.credential().unwrap().access_token, "abc");
    assert!(session.authorized_at.is_some());

    let second = session.authorize(Credential::new("other", 10));
    assert_eq!(second, Err(DomainError::AlreadyAuthorized));
    assert_eq!(session.credential().unwrap().access_token, "abc");
}

#[test]
fn test_expire_drops_credential() {
    let mut session = session("state-1");
    session.authorize(Credential::new("abc", 5000)).unwrap();

    session.expire();
    assert_eq!(session.status(), SessionStatus::Expired);
    assert!(session.credential().is_none());
    assert_eq!(
        session.authorize(Credential::new("abc", 5000)),
        Err(DomainError::NotFound)
    );
}

#[test]
fn test_matches_state_requires_exact_equality() {
    let session = session("abcdef");

    assert!(session.matches_state("abcdef"));
    assert!(!session.matches_state("abcdeg")); // same length, different value
    assert!(!session.matches_state("abcde"));
    assert!(!session.matches_state(""));
}

#[test]
fn test_credential_lifetime_and_expiry_instant() {
    let credential = Credential::new("abc", 5000);
    assert_eq!(credential.lifetime(), Duration::from_millis(5000));

    let mut session = session("state-1");
    assert!(session.credential_expires_at().is_none());

    session.authorize(credential).unwrap();
    let expires_at = session.credential_expires_at().unwrap();
    let authorized_at = session.authorized_at.unwrap();
    assert_eq!((expires_at - authorized_at).num_milliseconds(), 5000);
}

#[test]
fn test_credential_expired_at_deadline() {
    let mut session = session("state-1");
    assert!(!session.credential_expired(chrono::Utc::now()));

    session.authorize(Credential::new("abc", 5000)).unwrap();
    let authorized_at = session.authorized_at.unwrap();

    assert!(!session.credential_expired(authorized_at + chrono::Duration::milliseconds(4999)));
    assert!(session.credential_expired(authorized_at + chrono::Duration::milliseconds(5000)));
}
