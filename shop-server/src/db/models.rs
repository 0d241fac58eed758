//! Server-side records that carry data never sent to clients

use serde::{Deserialize, Serialize};
use shared::models::{Role, StaffUser};

/// Stored staff user
///
/// `role` is kept as its name so that a record written with a role this
/// build no longer knows still loads; such a user resolves to no role and
/// therefore no permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: i64,
    pub name: String,
    /// Normalized (trimmed, lowercase)
    pub email: String,
    pub role: String,
    pub hash_pass: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl StaffRecord {
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn is_active_admin(&self) -> bool {
        self.is_active && self.role() == Some(Role::Admin)
    }

    /// Client view; `None` when the stored role is unknown
    pub fn to_user(&self) -> Option<StaffUser> {
        Some(StaffUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role()?,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}
