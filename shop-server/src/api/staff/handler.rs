//! Staff API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::{StaffCreate, StaffUpdate, StaffUser};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::StaffRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// List all staff users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StaffUser>>> {
    let repo = StaffRepository::new(state.storage.clone());
    Ok(Json(repo.find_all()?))
}

/// Get staff user by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StaffUser>> {
    let repo = StaffRepository::new(state.storage.clone());
    let user = repo.find_by_id(id)?.ok_or_else(|| {
        AppError::with_message(ErrorCode::StaffNotFound, format!("Staff user {} not found", id))
    })?;
    Ok(Json(user))
}

/// Create a staff user
pub async fn create(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentUser>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<StaffUser>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email, "email")?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let repo = StaffRepository::new(state.storage.clone());
    let user = repo.create(payload)?;
    tracing::info!(
        actor_id = actor.id,
        user_id = user.id,
        role = %user.role,
        "Staff user created"
    );
    Ok(Json(user))
}

/// Update a staff user
pub async fn update(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<StaffUser>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email, "email")?;
    }
    if let Some(password) = &payload.password {
        validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
    }

    let repo = StaffRepository::new(state.storage.clone());
    let user = repo.update(id, payload, actor.id)?;
    tracing::info!(actor_id = actor.id, user_id = id, "Staff user updated");
    Ok(Json(user))
}

/// Delete a staff user
pub async fn delete(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = StaffRepository::new(state.storage.clone());
    repo.delete(id, actor.id)?;
    tracing::info!(actor_id = actor.id, user_id = id, "Staff user deleted");
    Ok(Json(true))
}
