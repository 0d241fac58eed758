//! Report API Handlers

use axum::{Json, extract::State};
use shared::models::SummaryReport;

use crate::core::ServerState;
use crate::db::repository::ReportRepository;
use crate::utils::AppResult;

/// Orders per status, revenue, open appointments and low stock
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<SummaryReport>> {
    let repo = ReportRepository::new(state.storage.clone());
    Ok(Json(repo.summary()?))
}
