//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::models::{Order, OrderQuery, OrderStatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// List orders, newest first (`?status=` filter)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.storage.clone());
    Ok(Json(repo.find_all(&query)?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.storage.clone());
    let order = repo.find_by_id(id)?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
    })?;
    Ok(Json(order))
}

/// Move an order to its next status
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let repo = OrderRepository::new(state.storage.clone());
    let order = repo.update_status(id, payload, Some(user.id))?;
    tracing::info!(
        user_id = user.id,
        order_id = id,
        status = order.status.as_str(),
        "Order status changed"
    );
    Ok(Json(order))
}
