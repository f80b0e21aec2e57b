//! Directory service
//!
//! Paginated search plus update/delete over user records. These are plain
//! parameterized queries; all session semantics live in the auth service.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::error::ApiError;
use crate::models::{PaginatedUsers, SearchParams, UpdateUserRequest, UserListing, UserResponse};

const DEFAULT_PAGE_LIMIT: i64 = 10;
const MAX_PAGE_LIMIT: i64 = 100;

/// Directory service errors
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Hashing error: {0}")]
    Hash(String),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return DirectoryError::EmailTaken;
            }
        }
        DirectoryError::Database(e.to_string())
    }
}

impl From<DirectoryError> for ApiError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::UserNotFound => ApiError::NotFound(e.to_string()),
            DirectoryError::PasswordMismatch => ApiError::Validation(e.to_string()),
            DirectoryError::EmailTaken => ApiError::Conflict(e.to_string()),
            DirectoryError::Database(detail) => ApiError::DatabaseError(detail),
            DirectoryError::Hash(detail) => ApiError::InternalError(detail),
        }
    }
}

/// Directory service
#[derive(Clone)]
pub struct DirectoryService {
    db_pool: PgPool,
}

impl DirectoryService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Case-insensitive substring search over name and email with offset
    /// pagination. Rows expose only {id, name, email}.
    pub async fn search(&self, params: &SearchParams) -> Result<PaginatedUsers, DirectoryError> {
        let page = params.page.unwrap_or(0).max(0);
        let limit = params
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        // page is client-supplied; saturate instead of overflowing on huge
        // values (Postgres handles an i64::MAX offset as an empty page)
        let offset = page.saturating_mul(limit);
        let pattern = format!("%{}%", params.search);

        let total_rows: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users
            WHERE name ILIKE $1 OR email ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.db_pool)
        .await?;

        let data: Vec<UserListing> = sqlx::query_as(
            r#"
            SELECT id, name, email FROM users
            WHERE name ILIKE $1 OR email ILIKE $1
            ORDER BY name ASC, id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(&pattern)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        let total_pages = (total_rows + limit - 1) / limit;

        Ok(PaginatedUsers {
            data,
            page,
            limit,
            total_rows,
            total_pages,
        })
    }

    /// Update a user's name and email, optionally re-hashing a new
    /// password when one is supplied (with matching confirmation).
    pub async fn update(
        &self,
        user_id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<UserResponse, DirectoryError> {
        let password_hash = match (&req.password, &req.confirm_password) {
            (None, _) => None,
            (Some(password), confirm) => {
                if confirm.as_deref() != Some(password.as_str()) {
                    return Err(DirectoryError::PasswordMismatch);
                }
                Some(hash_password(password).map_err(|e| DirectoryError::Hash(e.to_string()))?)
            }
        };

        let updated: Option<UserResponse> = sqlx::query_as::<_, crate::models::User>(
            r#"
            UPDATE users
            SET name = $1,
                email = $2,
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, email, password_hash, refresh_token, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&password_hash)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?
        .map(Into::into);

        updated.ok_or(DirectoryError::UserNotFound)
    }

    /// Delete a user record
    pub async fn delete(&self, user_id: Uuid) -> Result<(), DirectoryError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM users WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.db_pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(DirectoryError::UserNotFound);
        }

        Ok(())
    }
}
