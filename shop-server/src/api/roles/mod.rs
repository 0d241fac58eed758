//! Role & Permission API Module
//!
//! Read-only view of the static authorization table for the role panel.

mod handler;

use axum::{Router, middleware, routing::get};
use shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/roles", get(handler::list_roles))
        .route("/api/permissions", get(handler::list_permissions))
        .layer(middleware::from_fn(require_permission(Permission::ViewUsers)))
}
