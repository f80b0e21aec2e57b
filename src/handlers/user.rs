//! Directory HTTP handlers
//!
//! Search, update, and delete over user records. Every route here sits
//! behind the access-token guard.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::AuthenticatedUser;
use crate::models::{ApiEnvelope, PaginatedUsers, SearchParams, UpdateUserRequest, UserResponse};
use crate::state::AppState;

/// POST /users - Paginated directory search
pub async fn search_users(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    Json(params): Json<SearchParams>,
) -> ApiResult<Json<ApiEnvelope<PaginatedUsers>>> {
    let page = state.directory_service.search(&params).await?;

    Ok(Json(ApiEnvelope::ok("OK", page)))
}

/// PUT /users/:id - Update a user record
pub async fn update_user(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<ApiEnvelope<UserResponse>>> {
    let user = state.directory_service.update(user_id, &req).await?;

    Ok(Json(ApiEnvelope::ok("User updated", user)))
}

/// DELETE /users/:id - Delete a user record
pub async fn delete_user(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    state.directory_service.delete(user_id).await?;

    Ok(Json(ApiEnvelope::ok_empty("User deleted")))
}
