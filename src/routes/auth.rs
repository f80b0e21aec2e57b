//! Authentication routes

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::auth;
use crate::state::AppState;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/token", get(auth::refresh))
        .route("/logout", delete(auth::logout))
}
