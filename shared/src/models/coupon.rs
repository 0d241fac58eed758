//! Loyalty Coupon Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MAX_AMOUNT;
use crate::error::{AppError, ErrorCode};

/// Discount granted by a coupon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum CouponDiscount {
    /// Whole percent off the subtotal (1..=100)
    Percent(u8),
    /// Fixed amount off the subtotal
    Fixed(Decimal),
}

impl CouponDiscount {
    /// Check the discount value itself is sensible
    pub fn validate(&self) -> Result<(), AppError> {
        let ok = match self {
            CouponDiscount::Percent(p) => (1..=100).contains(p),
            CouponDiscount::Fixed(amount) => *amount > Decimal::ZERO && *amount <= MAX_AMOUNT,
        };
        if ok {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::CouponInvalidDiscount))
        }
    }

    /// Amount taken off `subtotal`, never more than the subtotal itself
    ///
    /// Fails with `ValueOutOfRange` when the arithmetic would overflow.
    pub fn amount_off(&self, subtotal: Decimal) -> Result<Decimal, AppError> {
        let raw = match self {
            CouponDiscount::Percent(p) => subtotal
                .checked_mul(Decimal::from(*p))
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                .map(|v| v.round_dp(2))
                .ok_or_else(|| {
                    AppError::with_message(ErrorCode::ValueOutOfRange, "Subtotal is too large")
                        .with_detail("field", "subtotal")
                })?,
            CouponDiscount::Fixed(amount) => *amount,
        };
        Ok(raw.min(subtotal).max(Decimal::ZERO))
    }
}

/// Loyalty coupon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: i64,
    /// Uppercase code entered at checkout
    pub code: String,
    pub description: Option<String>,
    pub discount: CouponDiscount,
    pub min_order_total: Option<Decimal>,
    pub max_uses: Option<u32>,
    pub used_count: u32,
    /// Expiry timestamp (millis)
    pub expires_at: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
}

impl Coupon {
    /// Validate the coupon for an order subtotal and return the discount
    ///
    /// Checks run in order: active, not expired, uses left, minimum total.
    pub fn redeemable_discount(&self, subtotal: Decimal, now: i64) -> Result<Decimal, AppError> {
        if !self.is_active {
            return Err(AppError::new(ErrorCode::CouponInactive));
        }
        if self.expires_at.is_some_and(|at| at <= now) {
            return Err(AppError::new(ErrorCode::CouponExpired));
        }
        if self.max_uses.is_some_and(|max| self.used_count >= max) {
            return Err(AppError::new(ErrorCode::CouponExhausted));
        }
        if let Some(min) = self.min_order_total {
            if subtotal < min {
                return Err(AppError::new(ErrorCode::CouponMinimumNotMet)
                    .with_detail("min_order_total", min.to_string()));
            }
        }
        self.discount.amount_off(subtotal)
    }
}

/// Normalize a coupon code for storage and lookup
pub fn normalize_coupon_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Create coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub description: Option<String>,
    pub discount: CouponDiscount,
    pub min_order_total: Option<Decimal>,
    pub max_uses: Option<u32>,
    pub expires_at: Option<i64>,
}

/// Update coupon payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponUpdate {
    pub description: Option<String>,
    pub discount: Option<CouponDiscount>,
    pub min_order_total: Option<Decimal>,
    pub max_uses: Option<u32>,
    pub expires_at: Option<i64>,
    pub is_active: Option<bool>,
}

/// Public coupon check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCheck {
    pub code: String,
    pub discount: CouponDiscount,
    pub amount_off: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn coupon(discount: CouponDiscount) -> Coupon {
        Coupon {
            id: 1,
            code: "SPRING10".to_string(),
            description: None,
            discount,
            min_order_total: None,
            max_uses: None,
            used_count: 0,
            expires_at: None,
            is_active: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_percent_discount_rounds_to_cents() {
        let d = CouponDiscount::Percent(15);
        assert_eq!(d.amount_off(dec("19.99")).unwrap(), dec("3.00"));
    }

    #[test]
    fn test_fixed_discount_capped_at_subtotal() {
        let d = CouponDiscount::Fixed(dec("50"));
        assert_eq!(d.amount_off(dec("30.00")).unwrap(), dec("30.00"));
        assert_eq!(d.amount_off(dec("80.00")).unwrap(), dec("50"));
    }

    #[test]
    fn test_percent_discount_overflow_is_an_error() {
        let err = CouponDiscount::Percent(10).amount_off(Decimal::MAX).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        // Fixed discounts never multiply
        assert_eq!(
            CouponDiscount::Fixed(dec("5")).amount_off(Decimal::MAX).unwrap(),
            dec("5")
        );
    }

    #[test]
    fn test_discount_validation() {
        assert!(CouponDiscount::Percent(0).validate().is_err());
        assert!(CouponDiscount::Percent(101).validate().is_err());
        assert!(CouponDiscount::Percent(100).validate().is_ok());
        assert!(CouponDiscount::Fixed(Decimal::ZERO).validate().is_err());
        assert!(CouponDiscount::Fixed(MAX_AMOUNT).validate().is_ok());
        assert!(CouponDiscount::Fixed(Decimal::MAX).validate().is_err());
    }

    #[test]
    fn test_redeemable_checks_in_order() {
        let mut c = coupon(CouponDiscount::Percent(10));
        assert_eq!(c.redeemable_discount(dec("100"), 10).unwrap(), dec("10"));

        c.min_order_total = Some(dec("200"));
        assert_eq!(
            c.redeemable_discount(dec("100"), 10).unwrap_err().code,
            ErrorCode::CouponMinimumNotMet
        );

        c.max_uses = Some(3);
        c.used_count = 3;
        assert_eq!(
            c.redeemable_discount(dec("100"), 10).unwrap_err().code,
            ErrorCode::CouponExhausted
        );

        c.expires_at = Some(10);
        assert_eq!(
            c.redeemable_discount(dec("100"), 10).unwrap_err().code,
            ErrorCode::CouponExpired
        );

        c.is_active = false;
        assert_eq!(
            c.redeemable_discount(dec("100"), 10).unwrap_err().code,
            ErrorCode::CouponInactive
        );
    }

    #[test]
    fn test_discount_serde_shape() {
        let json = serde_json::to_string(&CouponDiscount::Percent(20)).unwrap();
        assert_eq!(json, r#"{"type":"percent","value":20}"#);
        let fixed: CouponDiscount =
            serde_json::from_str(r#"{"type":"fixed","value":"12.50"}"#).unwrap();
        assert_eq!(fixed, CouponDiscount::Fixed(dec("12.50")));
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_coupon_code(" spring10 "), "SPRING10");
    }
}
