//! Repair & Fitting Appointment API Module (back office)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};
use shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/repairs", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(Permission::ViewRepairs)));

    let manage_routes = Router::new()
        .route("/{id}", put(handler::update))
        .layer(middleware::from_fn(require_permission(
            Permission::ManageRepairs,
        )));

    let assign_routes = Router::new()
        .route("/{id}/assign", put(handler::assign))
        .layer(middleware::from_fn(require_permission(
            Permission::AssignRepairs,
        )));

    read_routes.merge(manage_routes).merge(assign_routes)
}
