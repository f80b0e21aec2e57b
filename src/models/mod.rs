//! Data models for the directory server

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

/// User record.
///
/// `refresh_token` is the single server-side session pointer for the user:
/// set at login, nulled at logout, overwritten (never appended) by a later
/// login. Emails are stored and compared byte-for-byte (case-sensitive).
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response (sanitized for API, never exposes the hash or the
/// stored refresh token)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Directory listing row ({id, name, email} only)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct UserListing {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Access token response body for login and refresh
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User update request. Password change is optional; when present it must
/// match its confirmation.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Directory search parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Paginated directory listing
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedUsers {
    pub data: Vec<UserListing>,
    pub page: i64,
    pub limit: i64,
    pub total_rows: i64,
    pub total_pages: i64,
}

/// Response envelope used by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: u16,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            msg: msg.into(),
            data: Some(data),
        }
    }

    pub fn created(msg: impl Into<String>, data: T) -> Self {
        Self {
            status: 201,
            msg: msg.into(),
            data: Some(data),
        }
    }

    pub fn ok_empty(msg: impl Into<String>) -> Self {
        Self {
            status: 200,
            msg: msg.into(),
            data: None,
        }
    }
}
