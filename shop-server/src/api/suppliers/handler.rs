//! Supplier API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Supplier, SupplierCreate, SupplierUpdate};

use crate::core::ServerState;
use crate::db::repository::SupplierRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Supplier>>> {
    let repo = SupplierRepository::new(state.storage.clone());
    Ok(Json(repo.find_all()?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Supplier>> {
    let repo = SupplierRepository::new(state.storage.clone());
    let supplier = repo.find_by_id(id)?.ok_or_else(|| {
        AppError::with_message(ErrorCode::SupplierNotFound, format!("Supplier {} not found", id))
    })?;
    Ok(Json(supplier))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SupplierCreate>,
) -> AppResult<Json<Supplier>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(email) = &payload.contact_email {
        validate_email(email, "contact_email")?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let repo = SupplierRepository::new(state.storage.clone());
    Ok(Json(repo.create(payload)?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SupplierUpdate>,
) -> AppResult<Json<Supplier>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.contact_email {
        validate_email(email, "contact_email")?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let repo = SupplierRepository::new(state.storage.clone());
    Ok(Json(repo.update(id, payload)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = SupplierRepository::new(state.storage.clone());
    repo.delete(id)?;
    Ok(Json(true))
}
