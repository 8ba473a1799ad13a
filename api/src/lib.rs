//! HTTP surface of the number verification backend
//!
//! Library exports for the binary and the integration tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
