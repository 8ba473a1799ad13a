//! Tests for the session lifecycle manager
