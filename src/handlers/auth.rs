//! Authentication HTTP handlers
//!
//! Register, login, refresh, and logout. The refresh token travels only in
//! an http-only cookie; the access token only in the JSON body.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::error::{ApiError, ApiResult};
use crate::models::{
    AccessTokenResponse, ApiEnvelope, LoginRequest, RegisterRequest, UserResponse,
};
use crate::state::AppState;

/// Name of the refresh-token cookie
pub const REFRESH_COOKIE: &str = "refresh_token";

fn refresh_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

fn expired_refresh_cookie(secure: bool) -> Cookie<'static> {
    // Same attributes as the live cookie so browsers match and drop it
    refresh_cookie(String::new(), 0, secure)
}

/// POST /register - Create a new user record
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<UserResponse>>)> {
    let user = state.auth_service.register(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::created("Registered", user)),
    ))
}

/// POST /login - Verify credentials and open a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiEnvelope<AccessTokenResponse>>)> {
    let session = state.auth_service.login(&req.email, &req.password).await?;

    let jar = jar.add(refresh_cookie(
        session.refresh_token,
        session.refresh_max_age_seconds,
        state.cookie_secure,
    ));

    Ok((
        jar,
        Json(ApiEnvelope::ok(
            "Logged in",
            AccessTokenResponse {
                access_token: session.access_token,
                token_type: "Bearer".to_string(),
                expires_in: session.access_expires_in,
            },
        )),
    ))
}

/// GET /token - Mint a fresh access token from the refresh cookie
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<ApiEnvelope<AccessTokenResponse>>> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::AuthenticationFailed)?;

    let (access_token, expires_in) = state.auth_service.refresh(&refresh_token).await?;

    Ok(Json(ApiEnvelope::ok(
        "Token refreshed",
        AccessTokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        },
    )))
}

/// DELETE /logout - Close the session and clear the refresh cookie
///
/// Idempotent: an absent or unmatched cookie is treated as already logged
/// out, and the response is success-shaped either way.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiEnvelope<()>>)> {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        let token = cookie.value().to_string();
        state.auth_service.logout(&token).await?;
    }

    let jar = jar.remove(expired_refresh_cookie(state.cookie_secure));

    Ok((jar, Json(ApiEnvelope::ok_empty("Logged out"))))
}
