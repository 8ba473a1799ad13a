//! Tests for domain entities

#[cfg(test)]
mod verification_session_tests;
