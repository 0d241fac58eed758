//! Report Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Low-stock entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockProduct {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub stock: i64,
}

/// Back-office dashboard summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Order count keyed by kebab-case status
    pub orders_by_status: BTreeMap<String, u64>,
    /// Sum of totals for paid, shipped and delivered orders
    pub revenue: Decimal,
    /// Open appointment count keyed by kebab-case status
    pub open_appointments: BTreeMap<String, u64>,
    pub low_stock: Vec<LowStockProduct>,
    pub generated_at: i64,
}
