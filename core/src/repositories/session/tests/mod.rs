//! Tests for the session store
