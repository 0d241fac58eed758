//! Store Settings API Module

mod handler;

use axum::{Router, middleware, routing::get};
use shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/settings", get(handler::get).put(handler::update))
        .layer(middleware::from_fn(require_permission(
            Permission::ManageSettings,
        )))
}
