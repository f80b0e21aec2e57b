//! Authentication service
//!
//! Core session-lifecycle logic: register, login, refresh, logout. The
//! `users.refresh_token` column is the only server-side session state;
//! access tokens are self-verifying and untracked.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{RegisterRequest, User, UserResponse};

use super::jwt::{issue_access_token, issue_refresh_token, verify_token, JwtError};
use super::password::{hash_password, verify_password, PasswordError};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email, wrong password, and invalid/unmatched refresh tokens
    /// all collapse here. Which factor failed is never surfaced.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(String),

    #[error("Hashing error: {0}")]
    Hash(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AuthError::EmailTaken;
            }
        }
        AuthError::Database(e.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Hash(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::PasswordMismatch => ApiError::Validation(e.to_string()),
            AuthError::EmailTaken => ApiError::Conflict(e.to_string()),
            AuthError::InvalidCredentials => ApiError::AuthenticationFailed,
            AuthError::Database(detail) => ApiError::DatabaseError(detail),
            AuthError::Token(detail) | AuthError::Hash(detail) => ApiError::InternalError(detail),
        }
    }
}

/// Tokens minted at login, plus the cookie parameters for the refresh
/// token. Cookie placement itself is left to the HTTP boundary.
#[derive(Debug)]
pub struct IssuedSession {
    pub access_token: String,
    pub access_expires_in: i64,
    pub refresh_token: String,
    pub refresh_max_age_seconds: i64,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
    access_token_secret: String,
    refresh_token_secret: String,
    access_token_ttl_seconds: i64,
    refresh_token_ttl_days: i64,
}

impl AuthService {
    /// Create a new AuthService. The two secrets are independent by
    /// contract; tokens signed under one never validate under the other.
    pub fn new(
        db_pool: PgPool,
        access_token_secret: String,
        refresh_token_secret: String,
        access_token_ttl_seconds: i64,
        refresh_token_ttl_days: i64,
    ) -> Self {
        Self {
            db_pool,
            access_token_secret,
            refresh_token_secret,
            access_token_ttl_seconds,
            refresh_token_ttl_days,
        }
    }

    /// Register a new user.
    ///
    /// No password-strength or email-format policy is enforced; the empty
    /// password is hashed like any other. Fails when the confirmation does
    /// not match or the email is already taken.
    pub async fn register(&self, req: &RegisterRequest) -> Result<UserResponse, AuthError> {
        if req.password != req.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let password_hash = hash_password(&req.password)?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, password_hash, refresh_token)
            VALUES ($1, $2, $3, $4, NULL)
            RETURNING id, name, email, password_hash, refresh_token, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.email)
        .bind(&password_hash)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user.into())
    }

    /// Verify credentials and open a session.
    ///
    /// On success the refresh token is persisted into the user row,
    /// overwriting any prior value: a second login silently invalidates the
    /// previous session's refresh token (single active session per user,
    /// last write wins).
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthError> {
        let user: User = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, refresh_token, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token =
            issue_access_token(&user, &self.access_token_secret, self.access_token_ttl_seconds)?;
        let refresh_token =
            issue_refresh_token(&user, &self.refresh_token_secret, self.refresh_token_ttl_days)?;

        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(&refresh_token)
        .bind(user.id)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(IssuedSession {
            access_token,
            access_expires_in: self.access_token_ttl_seconds,
            refresh_token,
            refresh_max_age_seconds: self.refresh_token_ttl_days * 24 * 60 * 60,
        })
    }

    /// Mint a fresh access token from a presented refresh token.
    ///
    /// The token must validate under the refresh secret AND exactly match
    /// one stored `refresh_token` value. The stored-match requirement is
    /// what makes logout revoke a still-unexpired token. The stored refresh
    /// token is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(String, i64), AuthError> {
        verify_token(refresh_token, &self.refresh_token_secret)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let user: User = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, refresh_token, created_at, updated_at
            FROM users
            WHERE refresh_token = $1
            "#,
        )
        .bind(refresh_token)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        let access_token =
            issue_access_token(&user, &self.access_token_secret, self.access_token_ttl_seconds)?;

        Ok((access_token, self.access_token_ttl_seconds))
    }

    /// Close the session holding `refresh_token`.
    ///
    /// Idempotent cleanup: a stale or unmatched token is a successful
    /// no-op, never an error.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, refresh_token, created_at, updated_at
            FROM users
            WHERE refresh_token = $1
            "#,
        )
        .bind(refresh_token)
        .fetch_optional(&self.db_pool)
        .await?;

        if let Some(user) = user {
            sqlx::query(
                r#"
                UPDATE users
                SET refresh_token = NULL, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(user.id)
            .execute(&self.db_pool)
            .await?;

            tracing::info!(user_id = %user.id, "User logged out");
        }

        Ok(())
    }

    /// Access-token secret (for the request guard)
    pub fn access_token_secret(&self) -> &str {
        &self.access_token_secret
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::Token(e.to_string())
    }
}
