//! Store Settings Repository (singleton document)

use shared::error::ErrorCode;
use shared::models::{StoreSettings, StoreSettingsUpdate};
use shared::util::now_millis;

use super::{RepoError, RepoResult};
use crate::db::Storage;

const SETTINGS_KEY: &str = "store";

#[derive(Clone)]
pub struct SettingsRepository {
    storage: Storage,
}

impl SettingsRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Current settings, defaults when never saved
    pub fn get(&self) -> RepoResult<StoreSettings> {
        Ok(self
            .storage
            .get_document(SETTINGS_KEY)?
            .unwrap_or_default())
    }

    pub fn update(&self, data: StoreSettingsUpdate) -> RepoResult<StoreSettings> {
        let mut settings = self.get()?;

        if let Some(store_name) = data.store_name {
            settings.store_name = store_name.trim().to_string();
        }
        if data.contact_email.is_some() {
            settings.contact_email = data.contact_email;
        }
        if data.phone.is_some() {
            settings.phone = data.phone;
        }
        if let Some(currency) = data.currency {
            let currency = currency.trim().to_uppercase();
            if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(RepoError::rule(
                    ErrorCode::ValidationFailed,
                    "Currency must be a 3-letter ISO 4217 code",
                ));
            }
            settings.currency = currency;
        }
        if let Some(threshold) = data.low_stock_threshold {
            if threshold < 0 {
                return Err(RepoError::rule(
                    ErrorCode::ValueOutOfRange,
                    "Low-stock threshold cannot be negative",
                ));
            }
            settings.low_stock_threshold = threshold;
        }

        settings.updated_at = now_millis();
        self.storage.put_document(SETTINGS_KEY, &settings)?;
        Ok(settings)
    }
}
