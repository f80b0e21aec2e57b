//! Authentication module
//!
//! Email/password authentication with a dual-token session model.
//! - bcrypt password hashing and verification
//! - JWT access/refresh token generation under independent secrets
//! - Session lifecycle bound to the stored per-user refresh token

mod jwt;
mod password;
mod service;

pub use jwt::{
    issue_access_token, issue_refresh_token, user_id_from_claims, verify_token, Claims, JwtError,
};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AuthError, AuthService, IssuedSession};
