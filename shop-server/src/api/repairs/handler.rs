//! Appointment API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::models::{Appointment, AppointmentAssign, AppointmentQuery, AppointmentUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::AppointmentRepository;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// List appointments (`?status=&kind=&technician_id=`)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<AppointmentQuery>,
) -> AppResult<Json<Vec<Appointment>>> {
    let repo = AppointmentRepository::new(state.storage.clone());
    Ok(Json(repo.find_all(&query)?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    let repo = AppointmentRepository::new(state.storage.clone());
    let appointment = repo.find_by_id(id)?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::AppointmentNotFound,
            format!("Appointment {} not found", id),
        )
    })?;
    Ok(Json(appointment))
}

/// Progress, notes and costs
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentUpdate>,
) -> AppResult<Json<Appointment>> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let repo = AppointmentRepository::new(state.storage.clone());
    let appointment = repo.update(id, payload)?;
    tracing::info!(
        user_id = user.id,
        appointment_id = id,
        status = appointment.status.as_str(),
        "Appointment updated"
    );
    Ok(Json(appointment))
}

/// Hand an appointment to a technician
pub async fn assign(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentAssign>,
) -> AppResult<Json<Appointment>> {
    let repo = AppointmentRepository::new(state.storage.clone());
    let appointment = repo.assign(id, payload.technician_id)?;
    tracing::info!(
        user_id = user.id,
        appointment_id = id,
        technician_id = payload.technician_id,
        "Appointment assigned"
    );
    Ok(Json(appointment))
}
