//! Number verification route handlers
//!
//! - `GET /prepStep1`: start a verification and return the provider URL
//! - `GET /step2`: provider callback, exchanges the code for a credential
//! - `POST /verify-number`: check a number with the stored credential

pub mod complete;
pub mod initiate;
pub mod verify;

pub use complete::step2;
pub use initiate::prep_step1;
pub use verify::verify_number;

/// Cookie carrying the correlation token between the callback and verification
pub const STATE_COOKIE: &str = "state";
