//! Staff Repository

use redb::WriteTransaction;
use shared::error::ErrorCode;
use shared::models::{Role, StaffCreate, StaffUpdate, StaffUser};
use shared::util::{normalize_email, now_millis, snowflake_id};

use super::{RepoError, RepoResult};
use crate::db::models::StaffRecord;
use crate::db::{STAFF_TABLE, Storage};

/// Minimum password length for staff accounts
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone)]
pub struct StaffRepository {
    storage: Storage,
}

impl StaffRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// All staff users with a recognized role
    pub fn find_all(&self) -> RepoResult<Vec<StaffUser>> {
        let records: Vec<StaffRecord> = self.storage.list(STAFF_TABLE)?;
        Ok(records
            .iter()
            .filter_map(|r| {
                let user = r.to_user();
                if user.is_none() {
                    tracing::warn!(staff_id = r.id, role = %r.role, "Staff record has unknown role");
                }
                user
            })
            .collect())
    }

    pub fn find_record(&self, id: i64) -> RepoResult<Option<StaffRecord>> {
        Ok(self.storage.get(STAFF_TABLE, id)?)
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<StaffUser>> {
        Ok(self.find_record(id)?.and_then(|r| r.to_user()))
    }

    /// Lookup by email (case-insensitive)
    pub fn find_by_email(&self, email: &str) -> RepoResult<Option<StaffRecord>> {
        let email = normalize_email(email);
        let records: Vec<StaffRecord> = self.storage.list(STAFF_TABLE)?;
        Ok(records.into_iter().find(|r| r.email == email))
    }

    pub fn count(&self) -> RepoResult<u64> {
        Ok(self.storage.count(STAFF_TABLE)?)
    }

    pub fn create(&self, data: StaffCreate) -> RepoResult<StaffUser> {
        check_password(&data.password)?;
        let email = normalize_email(&data.email);

        let txn = self.storage.begin_write()?;
        let records: Vec<StaffRecord> = Storage::list_txn(&txn, STAFF_TABLE)?;
        ensure_email_free(&records, &email, None)?;

        let hash_pass = hash(&data.password)?;
        let now = now_millis();
        let record = StaffRecord {
            id: snowflake_id(),
            name: data.name.trim().to_string(),
            email,
            role: data.role.as_str().to_string(),
            hash_pass,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        Storage::put_txn(&txn, STAFF_TABLE, record.id, &record)?;
        Storage::commit(txn)?;

        to_user(&record)
    }

    /// Update a staff user on behalf of `actor_id`
    ///
    /// A user cannot deactivate themselves, and the last active admin
    /// cannot be demoted or deactivated.
    pub fn update(&self, id: i64, data: StaffUpdate, actor_id: i64) -> RepoResult<StaffUser> {
        if let Some(password) = &data.password {
            check_password(password)?;
        }
        if id == actor_id && data.is_active == Some(false) {
            return Err(RepoError::rule(
                ErrorCode::StaffCannotModifySelf,
                "You cannot deactivate your own account",
            ));
        }

        let txn = self.storage.begin_write()?;
        let records: Vec<StaffRecord> = Storage::list_txn(&txn, STAFF_TABLE)?;
        let mut record = records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))?;

        if let Some(email) = &data.email {
            let email = normalize_email(email);
            ensure_email_free(&records, &email, Some(id))?;
            record.email = email;
        }
        if let Some(name) = data.name {
            record.name = name.trim().to_string();
        }
        if let Some(password) = &data.password {
            record.hash_pass = hash(password)?;
        }

        let was_active_admin = record.is_active_admin();
        if let Some(role) = data.role {
            record.role = role.as_str().to_string();
        }
        if let Some(is_active) = data.is_active {
            record.is_active = is_active;
        }
        if was_active_admin && !record.is_active_admin() {
            ensure_other_active_admin(&records, id)?;
        }

        record.updated_at = now_millis();
        Storage::put_txn(&txn, STAFF_TABLE, id, &record)?;
        Storage::commit(txn)?;

        to_user(&record)
    }

    /// Delete a staff user on behalf of `actor_id`
    pub fn delete(&self, id: i64, actor_id: i64) -> RepoResult<()> {
        if id == actor_id {
            return Err(RepoError::rule(
                ErrorCode::StaffCannotModifySelf,
                "You cannot delete your own account",
            ));
        }

        let txn = self.storage.begin_write()?;
        let records: Vec<StaffRecord> = Storage::list_txn(&txn, STAFF_TABLE)?;
        let record = records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        if record.is_active_admin() {
            ensure_other_active_admin(&records, id)?;
        }

        Storage::remove_txn(&txn, STAFF_TABLE, id)?;
        Storage::commit(txn)?;
        Ok(())
    }

    /// Seed the first admin when no staff user exists
    ///
    /// Returns the created admin, or `None` when staff already exists.
    pub fn ensure_bootstrap_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> RepoResult<Option<StaffUser>> {
        let txn = self.storage.begin_write()?;
        if has_any_staff(&txn)? {
            return Ok(None);
        }
        check_password(password)?;

        let now = now_millis();
        let record = StaffRecord {
            id: snowflake_id(),
            name: name.to_string(),
            email: normalize_email(email),
            role: Role::Admin.as_str().to_string(),
            hash_pass: hash(password)?,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        Storage::put_txn(&txn, STAFF_TABLE, record.id, &record)?;
        Storage::commit(txn)?;

        Ok(Some(to_user(&record)?))
    }

    /// Active staff user eligible for workshop assignments
    pub fn find_active(&self, id: i64) -> RepoResult<Option<StaffUser>> {
        Ok(self.find_by_id(id)?.filter(|u| u.is_active))
    }
}

fn has_any_staff(txn: &WriteTransaction) -> RepoResult<bool> {
    let records: Vec<StaffRecord> = Storage::list_txn(txn, STAFF_TABLE)?;
    Ok(!records.is_empty())
}

fn check_password(password: &str) -> RepoResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(RepoError::rule(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

fn hash(password: &str) -> RepoResult<String> {
    StaffRecord::hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))
}

fn ensure_email_free(records: &[StaffRecord], email: &str, except: Option<i64>) -> RepoResult<()> {
    if records
        .iter()
        .any(|r| r.email == email && Some(r.id) != except)
    {
        return Err(RepoError::rule(
            ErrorCode::StaffEmailExists,
            format!("Email '{}' is already in use", email),
        ));
    }
    Ok(())
}

fn ensure_other_active_admin(records: &[StaffRecord], id: i64) -> RepoResult<()> {
    if !records.iter().any(|r| r.id != id && r.is_active_admin()) {
        return Err(RepoError::rule(
            ErrorCode::LastAdmin,
            "The last active admin cannot be removed, demoted or deactivated",
        ));
    }
    Ok(())
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(ErrorCode::StaffNotFound, format!("Staff user {} not found", id))
}

fn to_user(record: &StaffRecord) -> RepoResult<StaffUser> {
    record
        .to_user()
        .ok_or_else(|| RepoError::Database(format!("Staff {} has an unknown role", record.id)))
}
