//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::StaffNotFound
            | Self::OrderNotFound
            | Self::CouponNotFound
            | Self::ProductNotFound
            | Self::CategoryNotFound
            | Self::BrandNotFound
            | Self::SupplierNotFound
            | Self::AppointmentNotFound
            | Self::TechnicianNotFound
            | Self::ArticleNotFound
            | Self::EventNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::StaffEmailExists
            | Self::CouponCodeExists
            | Self::ProductSkuExists
            | Self::CategoryNameExists
            | Self::CategoryHasProducts
            | Self::BrandNameExists
            | Self::BrandHasProducts
            | Self::SupplierHasProducts
            | Self::OrderInvalidTransition
            | Self::AppointmentInvalidTransition
            | Self::EventFull
            | Self::EventAlreadyRegistered
            | Self::LastAdmin => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 429 Too Many Requests
            Self::AccountLocked => StatusCode::TOO_MANY_REQUESTS,

            // 403 Forbidden
            Self::PermissionDenied | Self::UnknownRole | Self::StaffCannotModifySelf => {
                StatusCode::FORBIDDEN
            }

            // 422 Unprocessable (business rules on well-formed input)
            Self::ProductOutOfStock
            | Self::InsufficientStock
            | Self::CouponInactive
            | Self::CouponExpired
            | Self::CouponExhausted
            | Self::CouponMinimumNotMet
            | Self::TechnicianNotEligible
            | Self::TechnicianRequired
            | Self::EventAlreadyStarted => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::StorageFull
            | Self::StorageCorrupted => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::AppointmentNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_auth_and_permission_status() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::TokenExpired.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ErrorCode::UnknownRole.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::AccountLocked.http_status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::StaffEmailExists.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::OrderInvalidTransition.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::LastAdmin.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_business_rule_status() {
        assert_eq!(
            ErrorCode::ProductOutOfStock.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::CouponExpired.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::TimeoutError.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_bad_request_default() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::PasswordTooShort.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
