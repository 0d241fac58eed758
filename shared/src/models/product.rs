//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Stock keeping unit, unique across the catalog
    pub sku: String,
    pub description: Option<String>,
    pub category_id: i64,
    pub brand_id: i64,
    pub supplier_id: Option<i64>,
    /// Unit price (serialized as decimal string)
    pub price: Decimal,
    pub stock: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category_id: i64,
    pub brand_id: i64,
    pub supplier_id: Option<i64>,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub price: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Stock adjustment payload (restock, shrinkage, count correction)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub delta: i64,
    pub reason: Option<String>,
}

/// Storefront product query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    /// Case-insensitive substring match on name or SKU
    pub q: Option<String>,
}
