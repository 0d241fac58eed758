//! Report API Module

mod handler;

use axum::{Router, middleware, routing::get};
use shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reports/summary", get(handler::summary))
        .layer(middleware::from_fn(require_permission(Permission::ViewReports)))
}
