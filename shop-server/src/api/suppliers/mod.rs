//! Supplier API Module (back office)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use shared::models::Permission;

use crate::auth::{require_any_permission, require_permission};
use crate::core::ServerState;

const SUPPLIER_READERS: &[Permission] = &[Permission::ManageInventory, Permission::ViewReports];

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/suppliers", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_any_permission(SUPPLIER_READERS)));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            Permission::ManageInventory,
        )));

    read_routes.merge(manage_routes)
}
