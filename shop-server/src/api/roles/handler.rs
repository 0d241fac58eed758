//! Role API Handlers

use axum::Json;
use serde::Serialize;
use shared::models::{Permission, RoleDescription};

use crate::auth::permissions::describe_roles;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct PermissionInfo {
    pub permission: Permission,
    pub description: &'static str,
}

/// Every role with the permissions it grants
pub async fn list_roles() -> AppResult<Json<Vec<RoleDescription>>> {
    Ok(Json(describe_roles()))
}

/// Every permission known to the system
pub async fn list_permissions() -> AppResult<Json<Vec<PermissionInfo>>> {
    let permissions = Permission::all()
        .iter()
        .map(|p| PermissionInfo {
            permission: *p,
            description: p.description(),
        })
        .collect();
    Ok(Json(permissions))
}
