//! Data models
//!
//! Shared between the shop server and its clients (via API).
//! All IDs are snowflake `i64` (see [`crate::util::snowflake_id`]).

pub mod appointment;
pub mod brand;
pub mod category;
pub mod content;
pub mod coupon;
pub mod order;
pub mod permission;
pub mod product;
pub mod report;
pub mod role;
pub mod settings;
pub mod staff;
pub mod supplier;

// Re-exports
pub use appointment::*;
pub use brand::*;
pub use category::*;
pub use content::*;
pub use coupon::*;
pub use order::*;
pub use permission::*;
pub use product::*;
pub use report::*;
pub use role::*;
pub use settings::*;
pub use staff::*;
pub use supplier::*;
