//! Access guard
//!
//! Extractor that verifies the bearer access token on protected routes and
//! attaches the decoded identity to the request. Purely cryptographic: it
//! never consults the store, which is why access tokens cannot be revoked
//! before natural expiry.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{user_id_from_claims, verify_token, AuthService, JwtError};
use crate::error::ApiError;

/// Authenticated identity decoded from the access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    tracing::debug!("Missing bearer access token");
                    ApiError::AuthenticationFailed.into_response()
                })?;

        let auth_service = Arc::<AuthService>::from_ref(state);

        // Expired and invalid are distinguished in the logs only; the
        // client sees the same opaque rejection for both.
        let claims =
            verify_token(bearer.token(), auth_service.access_token_secret()).map_err(|e| {
                match e {
                    JwtError::Expired => tracing::debug!("Access token expired"),
                    other => tracing::debug!(reason = %other, "Access token rejected"),
                }
                ApiError::AuthenticationFailed.into_response()
            })?;

        let user_id = user_id_from_claims(&claims).map_err(|e| {
            tracing::debug!(reason = %e, "Access token carried a bad subject");
            ApiError::AuthenticationFailed.into_response()
        })?;

        Ok(AuthenticatedUser {
            user_id,
            name: claims.name,
            email: claims.email,
        })
    }
}
