//! Repository Module
//!
//! CRUD and business-rule operations over the redb [`Storage`].
//! Repositories are cheap to construct (`XRepository::new(storage.clone())`)
//! and synchronous; each public call runs in its own transaction.

// Auth
pub mod staff;

// Catalog
pub mod brand;
pub mod category;
pub mod product;
pub mod supplier;

// Sales
pub mod coupon;
pub mod order;

// Workshop
pub mod appointment;

// Content
pub mod article;
pub mod event;

// System
pub mod report;
pub mod settings;

pub use appointment::AppointmentRepository;
pub use article::ArticleRepository;
pub use brand::BrandRepository;
pub use category::CategoryRepository;
pub use coupon::CouponRepository;
pub use event::EventRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use report::ReportRepository;
pub use settings::SettingsRepository;
pub use staff::StaffRepository;
pub use supplier::SupplierRepository;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::StorageError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Business rule violation with a specific error code
    #[error("{0}")]
    Rule(AppError),
}

impl RepoError {
    pub fn rule(code: ErrorCode, message: impl Into<String>) -> Self {
        RepoError::Rule(AppError::with_message(code, message))
    }
}

impl From<StorageError> for RepoError {
    fn from(err: StorageError) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<AppError> for RepoError {
    fn from(err: AppError) -> Self {
        RepoError::Rule(err)
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
