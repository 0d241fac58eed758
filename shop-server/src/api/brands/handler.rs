//! Brand API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Brand, BrandCreate, BrandUpdate};

use crate::core::ServerState;
use crate::db::repository::BrandRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Brand>>> {
    let repo = BrandRepository::new(state.storage.clone());
    Ok(Json(repo.find_all()?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Brand>> {
    let repo = BrandRepository::new(state.storage.clone());
    let brand = repo.find_by_id(id)?.ok_or_else(|| {
        AppError::with_message(ErrorCode::BrandNotFound, format!("Brand {} not found", id))
    })?;
    Ok(Json(brand))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BrandCreate>,
) -> AppResult<Json<Brand>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.website, "website", MAX_URL_LEN)?;

    let repo = BrandRepository::new(state.storage.clone());
    Ok(Json(repo.create(payload)?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BrandUpdate>,
) -> AppResult<Json<Brand>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.website, "website", MAX_URL_LEN)?;

    let repo = BrandRepository::new(state.storage.clone());
    Ok(Json(repo.update(id, payload)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = BrandRepository::new(state.storage.clone());
    repo.delete(id)?;
    Ok(Json(true))
}
