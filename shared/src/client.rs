//! Login / session DTOs shared between the server and admin clients

use serde::{Deserialize, Serialize};

use crate::models::{Permission, Role};

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: bearer token plus the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Authenticated staff user as seen by a client
///
/// `role` is `None` when the stored role name is no longer recognized;
/// such a user holds no permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub permissions: Vec<Permission>,
    pub is_active: bool,
    pub created_at: i64,
}
