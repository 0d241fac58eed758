//! Event API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Event, EventCreate, EventUpdate};

use crate::core::ServerState;
use crate::db::repository::EventRepository;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_BODY_LEN, MAX_NAME_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// All events with their registrations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Event>>> {
    let repo = EventRepository::new(state.storage.clone());
    Ok(Json(repo.find_all()?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Event>> {
    let repo = EventRepository::new(state.storage.clone());
    let event = repo.find_by_id(id)?.ok_or_else(|| {
        AppError::with_message(ErrorCode::EventNotFound, format!("Event {} not found", id))
    })?;
    Ok(Json(event))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> AppResult<Json<Event>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_BODY_LEN)?;
    validate_required_text(&payload.location, "location", MAX_ADDRESS_LEN)?;

    let repo = EventRepository::new(state.storage.clone());
    Ok(Json(repo.create(payload)?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EventUpdate>,
) -> AppResult<Json<Event>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(location) = &payload.location {
        validate_required_text(location, "location", MAX_ADDRESS_LEN)?;
    }

    let repo = EventRepository::new(state.storage.clone());
    Ok(Json(repo.update(id, payload)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = EventRepository::new(state.storage.clone());
    repo.delete(id)?;
    Ok(Json(true))
}
