//! Shared types for the Spoke bike shop
//!
//! Domain models (staff, roles, permissions, catalog, orders, service
//! appointments, coupons, content), the unified error system and the
//! login DTOs used by both the server and its clients.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Permission, Role};
