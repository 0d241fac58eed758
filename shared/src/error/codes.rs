//! Unified error codes for the Spoke bike shop
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Staff errors
//! - 4xxx: Order errors
//! - 5xxx: Coupon errors
//! - 6xxx: Catalog errors
//! - 7xxx: Service appointment errors
//! - 8xxx: Content errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization
/// and for the admin frontend, which switches on the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Too many failed logins
    AccountLocked = 1006,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// The caller's role is not recognized
    UnknownRole = 2002,

    // ==================== 3xxx: Staff ====================
    /// Staff user not found
    StaffNotFound = 3001,
    /// Staff email already exists
    StaffEmailExists = 3002,
    /// Cannot delete or deactivate own account
    StaffCannotModifySelf = 3003,
    /// Operation would leave no active administrator
    LastAdmin = 3004,
    /// Password too short
    PasswordTooShort = 3005,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Status change not allowed from the current status
    OrderInvalidTransition = 4003,
    /// Item quantity must be positive
    OrderInvalidQuantity = 4004,

    // ==================== 5xxx: Coupon ====================
    /// Coupon not found
    CouponNotFound = 5001,
    /// Coupon is disabled
    CouponInactive = 5002,
    /// Coupon has expired
    CouponExpired = 5003,
    /// Coupon has no uses left
    CouponExhausted = 5004,
    /// Order total is below the coupon minimum
    CouponMinimumNotMet = 5005,
    /// Coupon code already exists
    CouponCodeExists = 5006,
    /// Coupon discount value is invalid
    CouponInvalidDiscount = 5007,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product is out of stock
    ProductOutOfStock = 6003,
    /// Product SKU already exists
    ProductSkuExists = 6004,
    /// Stock adjustment would go below zero
    InsufficientStock = 6005,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category has products
    CategoryHasProducts = 6102,
    /// Category name already exists
    CategoryNameExists = 6103,
    /// Brand not found
    BrandNotFound = 6201,
    /// Brand has products
    BrandHasProducts = 6202,
    /// Brand name already exists
    BrandNameExists = 6203,
    /// Supplier not found
    SupplierNotFound = 6301,
    /// Supplier has products
    SupplierHasProducts = 6302,

    // ==================== 7xxx: Service appointments ====================
    /// Appointment not found
    AppointmentNotFound = 7001,
    /// Status change not allowed from the current status
    AppointmentInvalidTransition = 7002,
    /// Preferred date lies in the past
    AppointmentDateInPast = 7003,
    /// Assigned technician does not exist or is inactive
    TechnicianNotFound = 7004,
    /// Assignee's role cannot work on repairs
    TechnicianNotEligible = 7005,
    /// Work cannot start without an assigned technician
    TechnicianRequired = 7006,

    // ==================== 8xxx: Content ====================
    /// Article not found
    ArticleNotFound = 8001,
    /// Event not found
    EventNotFound = 8101,
    /// Event is fully booked
    EventFull = 8102,
    /// Email already registered for the event
    EventAlreadyRegistered = 8103,
    /// Event has already started
    EventAlreadyStarted = 8104,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Every defined code, in declaration order
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidRequest,
        ErrorCode::RequiredField,
        ErrorCode::ValueOutOfRange,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::AccountLocked,
        ErrorCode::AccountDisabled,
        ErrorCode::PermissionDenied,
        ErrorCode::UnknownRole,
        ErrorCode::StaffNotFound,
        ErrorCode::StaffEmailExists,
        ErrorCode::StaffCannotModifySelf,
        ErrorCode::LastAdmin,
        ErrorCode::PasswordTooShort,
        ErrorCode::OrderNotFound,
        ErrorCode::OrderEmpty,
        ErrorCode::OrderInvalidTransition,
        ErrorCode::OrderInvalidQuantity,
        ErrorCode::CouponNotFound,
        ErrorCode::CouponInactive,
        ErrorCode::CouponExpired,
        ErrorCode::CouponExhausted,
        ErrorCode::CouponMinimumNotMet,
        ErrorCode::CouponCodeExists,
        ErrorCode::CouponInvalidDiscount,
        ErrorCode::ProductNotFound,
        ErrorCode::ProductInvalidPrice,
        ErrorCode::ProductOutOfStock,
        ErrorCode::ProductSkuExists,
        ErrorCode::InsufficientStock,
        ErrorCode::CategoryNotFound,
        ErrorCode::CategoryHasProducts,
        ErrorCode::CategoryNameExists,
        ErrorCode::BrandNotFound,
        ErrorCode::BrandHasProducts,
        ErrorCode::BrandNameExists,
        ErrorCode::SupplierNotFound,
        ErrorCode::SupplierHasProducts,
        ErrorCode::AppointmentNotFound,
        ErrorCode::AppointmentInvalidTransition,
        ErrorCode::AppointmentDateInPast,
        ErrorCode::TechnicianNotFound,
        ErrorCode::TechnicianNotEligible,
        ErrorCode::TechnicianRequired,
        ErrorCode::ArticleNotFound,
        ErrorCode::EventNotFound,
        ErrorCode::EventFull,
        ErrorCode::EventAlreadyRegistered,
        ErrorCode::EventAlreadyStarted,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::TimeoutError,
        ErrorCode::ConfigError,
        ErrorCode::StorageFull,
        ErrorCode::StorageCorrupted,
    ];

    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountLocked => "Too many failed attempts, try again later",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::UnknownRole => "Role is not recognized",

            // Staff
            ErrorCode::StaffNotFound => "Staff user not found",
            ErrorCode::StaffEmailExists => "A staff user with this email already exists",
            ErrorCode::StaffCannotModifySelf => "Cannot delete or deactivate your own account",
            ErrorCode::LastAdmin => "At least one active administrator is required",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::OrderInvalidTransition => "Order status change is not allowed",
            ErrorCode::OrderInvalidQuantity => "Item quantity must be positive",

            // Coupon
            ErrorCode::CouponNotFound => "Coupon not found",
            ErrorCode::CouponInactive => "Coupon is not active",
            ErrorCode::CouponExpired => "Coupon has expired",
            ErrorCode::CouponExhausted => "Coupon has no uses left",
            ErrorCode::CouponMinimumNotMet => "Order total is below the coupon minimum",
            ErrorCode::CouponCodeExists => "Coupon code already exists",
            ErrorCode::CouponInvalidDiscount => "Coupon discount is invalid",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product price must be positive",
            ErrorCode::ProductOutOfStock => "Product is out of stock",
            ErrorCode::ProductSkuExists => "Product SKU already exists",
            ErrorCode::InsufficientStock => "Stock cannot go below zero",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Category has associated products",
            ErrorCode::CategoryNameExists => "Category name already exists",
            ErrorCode::BrandNotFound => "Brand not found",
            ErrorCode::BrandHasProducts => "Brand has associated products",
            ErrorCode::BrandNameExists => "Brand name already exists",
            ErrorCode::SupplierNotFound => "Supplier not found",
            ErrorCode::SupplierHasProducts => "Supplier has associated products",

            // Service appointments
            ErrorCode::AppointmentNotFound => "Appointment not found",
            ErrorCode::AppointmentInvalidTransition => "Appointment status change is not allowed",
            ErrorCode::AppointmentDateInPast => "Preferred date must not be in the past",
            ErrorCode::TechnicianNotFound => "Technician not found",
            ErrorCode::TechnicianNotEligible => "Staff user cannot be assigned to repairs",
            ErrorCode::TechnicianRequired => "Assign a technician before starting work",

            // Content
            ErrorCode::ArticleNotFound => "Article not found",
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::EventFull => "Event is fully booked",
            ErrorCode::EventAlreadyRegistered => "Email is already registered for this event",
            ErrorCode::EventAlreadyStarted => "Event has already started",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageFull => "Storage full (disk space insufficient)",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
