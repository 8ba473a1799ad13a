//! Utility functions

pub mod phone;
