//! Order pricing
//!
//! All money is `rust_decimal::Decimal`, rounded to cents at line level.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderItem, Product};

/// Money totals of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

fn out_of_range(what: &str) -> AppError {
    AppError::with_message(ErrorCode::ValueOutOfRange, format!("{what} is too large"))
}

/// Snapshot a catalog product into an order line
pub fn line_item(product: &Product, quantity: u32) -> Result<OrderItem, AppError> {
    let unit_price = product.price.round_dp(2);
    let line_total = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| out_of_range("Line total").with_detail("product_id", product.id))?
        .round_dp(2);
    Ok(OrderItem {
        product_id: product.id,
        product_name: product.name.clone(),
        sku: product.sku.clone(),
        unit_price,
        quantity,
        line_total,
    })
}

pub fn subtotal(items: &[OrderItem]) -> Result<Decimal, AppError> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, i| acc.checked_add(i.line_total))
        .ok_or_else(|| out_of_range("Order subtotal"))
}

/// Apply a discount; it is clamped to `[0, subtotal]`
pub fn totals(subtotal: Decimal, discount: Decimal) -> OrderTotals {
    let discount = discount.max(Decimal::ZERO).min(subtotal);
    OrderTotals {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(price: &str) -> Product {
        Product {
            id: 1,
            name: "Tube".to_string(),
            sku: "TB-1".to_string(),
            description: None,
            category_id: 1,
            brand_id: 1,
            supplier_id: None,
            price: dec(price),
            stock: 10,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_line_item_snapshot() {
        let item = line_item(&product("5.99"), 3).unwrap();
        assert_eq!(item.unit_price, dec("5.99"));
        assert_eq!(item.line_total, dec("17.97"));
        assert_eq!(item.sku, "TB-1");
    }

    #[test]
    fn test_subtotal_sums_lines() {
        let items = vec![
            line_item(&product("5.99"), 3).unwrap(),
            line_item(&product("0.10"), 3).unwrap(),
        ];
        assert_eq!(subtotal(&items).unwrap(), dec("18.27"));
    }

    #[test]
    fn test_overflow_is_out_of_range() {
        let mut huge = product("1");
        huge.price = Decimal::MAX;
        assert_eq!(
            line_item(&huge, 2).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );

        let max_line = line_item(&huge, 1).unwrap();
        let err = subtotal(&[max_line.clone(), max_line]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_discount_is_clamped() {
        let t = totals(dec("20.00"), dec("25.00"));
        assert_eq!(t.discount, dec("20.00"));
        assert_eq!(t.total, Decimal::ZERO);

        let t = totals(dec("20.00"), dec("2.50"));
        assert_eq!(t.total, dec("17.50"));
    }
}
