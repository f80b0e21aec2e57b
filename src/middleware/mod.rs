//! Middleware for the directory API
//!
//! Request tracing, security headers, and the access-token guard.

pub mod auth;
mod security;
mod tracing;

pub use auth::AuthenticatedUser;
pub use security::{hsts_header, security_headers};
pub use tracing::request_tracing;
