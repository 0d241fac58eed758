//! Article API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::{Article, ArticleCreate, ArticleUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::ArticleRepository;
use crate::utils::validation::{MAX_BODY_LEN, MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Article>>> {
    let repo = ArticleRepository::new(state.storage.clone());
    Ok(Json(repo.find_all()?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Article>> {
    let repo = ArticleRepository::new(state.storage.clone());
    let article = repo.find_by_id(id)?.ok_or_else(|| article_not_found(id))?;
    Ok(Json(article))
}

/// Create an article; the current user becomes its author
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ArticleCreate>,
) -> AppResult<Json<Article>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.body, "body", MAX_BODY_LEN)?;

    let repo = ArticleRepository::new(state.storage.clone());
    Ok(Json(repo.create(payload, user.id)?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ArticleUpdate>,
) -> AppResult<Json<Article>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(body) = &payload.body {
        validate_required_text(body, "body", MAX_BODY_LEN)?;
    }

    let repo = ArticleRepository::new(state.storage.clone());
    Ok(Json(repo.update(id, payload)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let repo = ArticleRepository::new(state.storage.clone());
    repo.delete(id)?;
    Ok(Json(true))
}

fn article_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ArticleNotFound, format!("Article {} not found", id))
}
