//! Coupon Repository

use redb::WriteTransaction;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{Coupon, CouponCheck, CouponCreate, CouponUpdate, normalize_coupon_code};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult};
use crate::db::{COUPONS_TABLE, Storage};

#[derive(Clone)]
pub struct CouponRepository {
    storage: Storage,
}

impl CouponRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> RepoResult<Vec<Coupon>> {
        let mut coupons: Vec<Coupon> = self.storage.list(COUPONS_TABLE)?;
        coupons.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(coupons)
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Coupon>> {
        Ok(self.storage.get(COUPONS_TABLE, id)?)
    }

    pub fn find_by_code(&self, code: &str) -> RepoResult<Option<Coupon>> {
        let code = normalize_coupon_code(code);
        Ok(self.find_all()?.into_iter().find(|c| c.code == code))
    }

    pub fn create(&self, data: CouponCreate) -> RepoResult<Coupon> {
        data.discount.validate()?;
        let code = normalize_coupon_code(&data.code);

        let txn = self.storage.begin_write()?;
        let existing: Vec<Coupon> = Storage::list_txn(&txn, COUPONS_TABLE)?;
        if existing.iter().any(|c| c.code == code) {
            return Err(RepoError::rule(
                ErrorCode::CouponCodeExists,
                format!("Coupon '{}' already exists", code),
            ));
        }

        let coupon = Coupon {
            id: snowflake_id(),
            code,
            description: data.description,
            discount: data.discount,
            min_order_total: data.min_order_total,
            max_uses: data.max_uses,
            used_count: 0,
            expires_at: data.expires_at,
            is_active: true,
            created_at: now_millis(),
        };
        Storage::put_txn(&txn, COUPONS_TABLE, coupon.id, &coupon)?;
        Storage::commit(txn)?;
        Ok(coupon)
    }

    pub fn update(&self, id: i64, data: CouponUpdate) -> RepoResult<Coupon> {
        let txn = self.storage.begin_write()?;
        let mut coupon: Coupon =
            Storage::get_txn(&txn, COUPONS_TABLE, id)?.ok_or_else(|| not_found(id))?;

        if data.description.is_some() {
            coupon.description = data.description;
        }
        if let Some(discount) = data.discount {
            discount.validate()?;
            coupon.discount = discount;
        }
        if data.min_order_total.is_some() {
            coupon.min_order_total = data.min_order_total;
        }
        if data.max_uses.is_some() {
            coupon.max_uses = data.max_uses;
        }
        if data.expires_at.is_some() {
            coupon.expires_at = data.expires_at;
        }
        if let Some(is_active) = data.is_active {
            coupon.is_active = is_active;
        }

        Storage::put_txn(&txn, COUPONS_TABLE, id, &coupon)?;
        Storage::commit(txn)?;
        Ok(coupon)
    }

    pub fn delete(&self, id: i64) -> RepoResult<()> {
        if !self.storage.remove(COUPONS_TABLE, id)? {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Validate a code against a subtotal without redeeming it
    pub fn check(&self, code: &str, subtotal: Decimal) -> RepoResult<CouponCheck> {
        let coupon = self
            .find_by_code(code)?
            .ok_or_else(|| code_not_found(code))?;
        let amount_off = coupon.redeemable_discount(subtotal, now_millis())?;
        Ok(CouponCheck {
            code: coupon.code,
            discount: coupon.discount,
            amount_off,
        })
    }
}

/// Validate and count one use of `code` inside the checkout transaction
///
/// Returns the normalized code and the amount taken off `subtotal`.
pub(crate) fn redeem_txn(
    txn: &WriteTransaction,
    code: &str,
    subtotal: Decimal,
    now: i64,
) -> RepoResult<(String, Decimal)> {
    let normalized = normalize_coupon_code(code);
    let coupons: Vec<Coupon> = Storage::list_txn(txn, COUPONS_TABLE)?;
    let mut coupon = coupons
        .into_iter()
        .find(|c| c.code == normalized)
        .ok_or_else(|| code_not_found(code))?;

    let amount_off = coupon.redeemable_discount(subtotal, now)?;
    coupon.used_count = coupon.used_count.saturating_add(1);
    Storage::put_txn(txn, COUPONS_TABLE, coupon.id, &coupon)?;
    Ok((coupon.code, amount_off))
}

fn code_not_found(code: &str) -> RepoError {
    RepoError::rule(
        ErrorCode::CouponNotFound,
        format!("Coupon '{}' not found", code.trim()),
    )
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(ErrorCode::CouponNotFound, format!("Coupon {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CouponDiscount;

    fn create(repo: &CouponRepository, code: &str, max_uses: Option<u32>) -> Coupon {
        repo.create(CouponCreate {
            code: code.to_string(),
            description: None,
            discount: CouponDiscount::Percent(10),
            min_order_total: None,
            max_uses,
            expires_at: None,
        })
        .unwrap()
    }

    #[test]
    fn test_codes_are_normalized_and_unique() {
        let repo = CouponRepository::new(Storage::open_in_memory().unwrap());
        let c = create(&repo, " spring10 ", None);
        assert_eq!(c.code, "SPRING10");
        let err = repo
            .create(CouponCreate {
                code: "Spring10".to_string(),
                description: None,
                discount: CouponDiscount::Percent(5),
                min_order_total: None,
                max_uses: None,
                expires_at: None,
            })
            .unwrap_err();
        assert!(matches!(err, RepoError::Rule(e) if e.code == ErrorCode::CouponCodeExists));
    }

    #[test]
    fn test_invalid_discount_rejected() {
        let repo = CouponRepository::new(Storage::open_in_memory().unwrap());
        let err = repo
            .create(CouponCreate {
                code: "BROKEN".to_string(),
                description: None,
                discount: CouponDiscount::Percent(0),
                min_order_total: None,
                max_uses: None,
                expires_at: None,
            })
            .unwrap_err();
        assert!(matches!(err, RepoError::Rule(e) if e.code == ErrorCode::CouponInvalidDiscount));
    }

    #[test]
    fn test_check_does_not_consume() {
        let repo = CouponRepository::new(Storage::open_in_memory().unwrap());
        create(&repo, "ONCE", Some(1));
        let check = repo.check("once", Decimal::new(5000, 2)).unwrap();
        assert_eq!(check.amount_off, Decimal::new(500, 2));
        assert_eq!(repo.find_by_code("ONCE").unwrap().unwrap().used_count, 0);
    }

    #[test]
    fn test_redeem_counts_uses() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = CouponRepository::new(storage.clone());
        create(&repo, "ONCE", Some(1));

        let txn = storage.begin_write().unwrap();
        let (code, _) = redeem_txn(&txn, "once", Decimal::new(100, 0), now_millis()).unwrap();
        assert_eq!(code, "ONCE");
        Storage::commit(txn).unwrap();

        let err = repo.check("ONCE", Decimal::new(100, 0)).unwrap_err();
        assert!(matches!(err, RepoError::Rule(e) if e.code == ErrorCode::CouponExhausted));
    }

    #[test]
    fn test_unknown_code() {
        let repo = CouponRepository::new(Storage::open_in_memory().unwrap());
        let err = repo.check("NOPE", Decimal::ONE).unwrap_err();
        assert!(matches!(err, RepoError::Rule(e) if e.code == ErrorCode::CouponNotFound));
    }
}
