//! Unit tests for identity provider module

#[cfg(test)]
pub mod mock_provider_tests;
