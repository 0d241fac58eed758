//! Store Settings Model

use serde::{Deserialize, Serialize};

/// Store-wide settings (singleton)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub store_name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    /// ISO 4217 code shown on the storefront
    pub currency: String,
    /// Products at or below this stock show up in the low-stock report
    pub low_stock_threshold: i64,
    pub updated_at: i64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: "Spoke Bike Shop".to_string(),
            contact_email: None,
            phone: None,
            currency: "EUR".to_string(),
            low_stock_threshold: 3,
            updated_at: 0,
        }
    }
}

/// Update settings payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettingsUpdate {
    pub store_name: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub currency: Option<String>,
    pub low_stock_threshold: Option<i64>,
}

/// Public storefront info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    pub store_name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub currency: String,
}

impl From<&StoreSettings> for StoreInfo {
    fn from(s: &StoreSettings) -> Self {
        Self {
            store_name: s.store_name.clone(),
            contact_email: s.contact_email.clone(),
            phone: s.phone.clone(),
            currency: s.currency.clone(),
        }
    }
}
