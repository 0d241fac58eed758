//! Coupon API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Coupon, CouponCreate, CouponUpdate};

use crate::core::ServerState;
use crate::db::repository::CouponRepository;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Coupon>>> {
    let repo = CouponRepository::new(state.storage.clone());
    Ok(Json(repo.find_all()?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Coupon>> {
    let repo = CouponRepository::new(state.storage.clone());
    let coupon = repo.find_by_id(id)?.ok_or_else(|| {
        AppError::with_message(ErrorCode::CouponNotFound, format!("Coupon {} not found", id))
    })?;
    Ok(Json(coupon))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<Json<Coupon>> {
    validate_required_text(&payload.code, "code", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = CouponRepository::new(state.storage.clone());
    Ok(Json(repo.create(payload)?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<Coupon>> {
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = CouponRepository::new(state.storage.clone());
    Ok(Json(repo.update(id, payload)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = CouponRepository::new(state.storage.clone());
    repo.delete(id)?;
    Ok(Json(true))
}
