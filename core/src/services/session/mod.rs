//! Session lifecycle module
//!
//! Creates verification sessions, validates their transitions and keeps the
//! eviction schedule in step with each session's status:
//! - `Initiated` sessions are evicted after the pending-session TTL
//! - `Authorized` sessions are evicted when their credential lapses

mod config;
mod manager;

#[cfg(test)]
mod tests;

pub use config::SessionLifecycleConfig;
pub use manager::SessionLifecycleManager;
