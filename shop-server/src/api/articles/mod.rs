//! Articles API Module (back office)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/articles", routes())
}

fn routes() -> Router<ServerState> {
    // Drafts included
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(Permission::ViewContent)));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            Permission::ManageContent,
        )));

    read_routes.merge(manage_routes)
}
