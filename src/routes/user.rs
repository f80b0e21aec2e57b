//! Directory route definitions

use axum::{
    routing::{delete, post, put},
    Router,
};

use crate::handlers::user::{delete_user, search_users, update_user};
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(search_users))
        .route("/users/:id", put(update_user))
        .route("/users/:id", delete(delete_user))
}
