//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::util::normalize_email;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::StaffRepository;
use crate::security_log;
use crate::utils::validation::{MAX_EMAIL_LEN, MAX_PASSWORD_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Login handler
///
/// Authenticates staff credentials and returns a JWT token.
/// Unknown email and wrong password share one error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let email = normalize_email(&req.email);
    if state.login_guard.is_locked(&email) {
        security_log!("WARN", "login_locked", email = email.as_str());
        return Err(AppError::new(ErrorCode::AccountLocked));
    }

    let repo = StaffRepository::new(state.storage.clone());
    let record = repo.find_by_email(&email)?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(state.config.login_delay_ms)).await;

    let password_valid = match &record {
        Some(r) => r
            .verify_password(&req.password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?,
        None => false,
    };

    let record = match record {
        Some(r) if password_valid => r,
        _ => {
            let attempts = state.login_guard.record_failure(&email);
            security_log!(
                "WARN",
                "login_failed",
                email = email.as_str(),
                attempts = attempts
            );
            return Err(AppError::invalid_credentials());
        }
    };

    if !record.is_active {
        security_log!("WARN", "login_disabled", user_id = record.id);
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    // A stored role this build no longer knows: the account exists but can do nothing
    let user = record.to_user().ok_or_else(|| {
        security_log!(
            "WARN",
            "unknown_role",
            user_id = record.id,
            role = record.role.as_str()
        );
        AppError::new(ErrorCode::UnknownRole)
    })?;

    state.login_guard.record_success(&email);

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = user.id,
        email = %user.email,
        role = %user.role,
        "Staff user logged in"
    );

    Ok(Json(LoginResponse {
        token,
        expires_in: state.jwt_service.expires_in_seconds(),
        user: UserInfo {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: Some(user.role),
            permissions: crate::auth::permissions_for_role(user.role)
                .iter()
                .copied()
                .collect(),
            is_active: user.is_active,
            created_at: user.created_at,
        },
    }))
}

/// Get current user info with the permissions of their role
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<UserInfo>> {
    let repo = StaffRepository::new(state.storage.clone());
    let record = repo
        .find_record(user.id)?
        .ok_or_else(|| AppError::new(ErrorCode::StaffNotFound))?;

    Ok(Json(UserInfo {
        id: user.id,
        name: record.name,
        email: record.email,
        role: user.role,
        permissions: user.permissions().iter().copied().collect(),
        is_active: record.is_active,
        created_at: record.created_at,
    }))
}
