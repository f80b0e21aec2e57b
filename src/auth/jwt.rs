//! JWT token generation and validation
//!
//! Access and refresh tokens are signed with two independent secrets so a
//! leaked access secret cannot mint long-lived refresh tokens. A token
//! signed under one secret never validates under the other.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::User;

/// JWT-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token expired")]
    Expired,

    #[error("Bad token signature")]
    BadSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),
}

/// Claims carried by both access and refresh tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User display name
    pub name: String,
    /// User email
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Generate a short-lived access token, signed with the access secret
pub fn issue_access_token(user: &User, secret: &str, ttl_seconds: i64) -> Result<String, JwtError> {
    issue_token(user, secret, ttl_seconds)
}

/// Generate a long-lived refresh token, signed with the refresh secret
pub fn issue_refresh_token(user: &User, secret: &str, ttl_days: i64) -> Result<String, JwtError> {
    issue_token(user, secret, ttl_days * 24 * 60 * 60)
}

fn issue_token(user: &User, secret: &str, ttl_seconds: i64) -> Result<String, JwtError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_seconds);

    let claims = Claims {
        sub: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Verify signature and expiry, returning the decoded claims.
///
/// An expired or tampered token is never partially trusted: the claims are
/// only returned when the whole token validates under `secret`. Expiry is
/// checked without leeway; access tokens live in the tens-of-seconds class,
/// so even a small grace window would be a meaningful extension.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::Expired,
        ErrorKind::InvalidSignature => JwtError::BadSignature,
        _ => JwtError::Malformed(e.to_string()),
    })?;

    Ok(token_data.claims)
}

/// Extract the user ID from claims
pub fn user_id_from_claims(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|e| JwtError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            refresh_token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let user = create_test_user();
        let secret = "access-secret";

        let token = issue_access_token(&user, secret, 20).unwrap();
        assert!(!token.is_empty());

        let claims = verify_token(&token, secret).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.name, user.name);
        assert_eq!(claims.email, user.email);
        assert_eq!(user_id_from_claims(&claims).unwrap(), user.id);
    }

    #[test]
    fn test_issue_and_verify_refresh_token() {
        let user = create_test_user();
        let secret = "refresh-secret";

        let token = issue_refresh_token(&user, secret, 1).unwrap();
        let claims = verify_token(&token, secret).unwrap();
        assert_eq!(claims.email, user.email);
        // Roughly one day of lifetime
        assert!(claims.exp - claims.iat >= 24 * 60 * 60);
    }

    #[test]
    fn test_secrets_are_not_interchangeable() {
        let user = create_test_user();

        let access = issue_access_token(&user, "access-secret", 20).unwrap();
        let refresh = issue_refresh_token(&user, "refresh-secret", 1).unwrap();

        assert!(matches!(
            verify_token(&access, "refresh-secret"),
            Err(JwtError::BadSignature)
        ));
        assert!(matches!(
            verify_token(&refresh, "access-secret"),
            Err(JwtError::BadSignature)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let user = create_test_user();
        let token = issue_access_token(&user, "access-secret", -3600).unwrap();

        assert!(matches!(
            verify_token(&token, "access-secret"),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_just_expired_token_rejected_without_grace() {
        let user = create_test_user();
        // Seconds past expiry, inside what a default leeway would forgive
        let token = issue_access_token(&user, "access-secret", -5).unwrap();

        assert!(matches!(
            verify_token(&token, "access-secret"),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        assert!(matches!(
            verify_token("not.a.token", "access-secret"),
            Err(JwtError::Malformed(_))
        ));
    }
}
