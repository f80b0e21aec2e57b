//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::AuthService;
use crate::services::DirectoryService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub directory_service: Arc<DirectoryService>,
    pub db_pool: PgPool,
    /// Whether refresh cookies carry the Secure flag (off in development)
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        directory_service: Arc<DirectoryService>,
        db_pool: PgPool,
        cookie_secure: bool,
    ) -> Self {
        Self {
            auth_service,
            directory_service,
            db_pool,
            cookie_secure,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<DirectoryService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.directory_service.clone()
    }
}
