//! Store Settings API Handlers

use axum::{
    Extension, Json,
    extract::State,
};
use shared::models::{StoreSettings, StoreSettingsUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::SettingsRepository;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};

pub async fn get(State(state): State<ServerState>) -> AppResult<Json<StoreSettings>> {
    let repo = SettingsRepository::new(state.storage.clone());
    Ok(Json(repo.get()?))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<StoreSettingsUpdate>,
) -> AppResult<Json<StoreSettings>> {
    if let Some(name) = &payload.store_name {
        validate_required_text(name, "store_name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.contact_email {
        validate_email(email, "contact_email")?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let repo = SettingsRepository::new(state.storage.clone());
    let settings = repo.update(payload)?;
    tracing::info!(user_id = user.id, "Store settings updated");
    Ok(Json(settings))
}
