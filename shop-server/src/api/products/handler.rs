//! Product API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::models::{Product, ProductCreate, ProductQuery, ProductUpdate, StockAdjustment};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{ProductRepository, SettingsRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// List products, inactive included
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.storage.clone());
    Ok(Json(repo.search(&query, false)?))
}

/// Products at or below the configured low-stock threshold
pub async fn low_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let threshold = SettingsRepository::new(state.storage.clone())
        .get()?
        .low_stock_threshold;
    let repo = ProductRepository::new(state.storage.clone());
    Ok(Json(repo.low_stock(threshold)?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.storage.clone());
    let product = repo.find_by_id(id)?.ok_or_else(|| product_not_found(id))?;
    Ok(Json(product))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = ProductRepository::new(state.storage.clone());
    Ok(Json(repo.create(payload)?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(sku) = &payload.sku {
        validate_required_text(sku, "sku", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = ProductRepository::new(state.storage.clone());
    Ok(Json(repo.update(id, payload)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.storage.clone());
    repo.delete(id)?;
    Ok(Json(true))
}

/// Manual stock correction (delivery received, shrinkage, recount)
pub async fn adjust_stock(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<StockAdjustment>,
) -> AppResult<Json<Product>> {
    validate_optional_text(&payload.reason, "reason", MAX_NOTE_LEN)?;
    if payload.delta == 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "Stock adjustment must not be zero",
        ));
    }

    let repo = ProductRepository::new(state.storage.clone());
    let product = repo.adjust_stock(id, payload.delta)?;
    tracing::info!(
        user_id = user.id,
        product_id = id,
        delta = payload.delta,
        stock = product.stock,
        reason = payload.reason.as_deref().unwrap_or(""),
        "Stock adjusted"
    );
    Ok(Json(product))
}

fn product_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
}
