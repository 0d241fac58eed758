//! Order Repository
//!
//! Checkout and cancellation touch products, coupons and orders; each runs
//! in a single write transaction so a failure leaves nothing behind.

use std::collections::BTreeMap;

use redb::WriteTransaction;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    CheckoutRequest, Order, OrderQuery, OrderStatus, OrderStatusChange, OrderStatusUpdate,
    Product,
};
use shared::util::{normalize_email, now_millis, snowflake_id};

use super::coupon::redeem_txn;
use super::product::adjust_stock_txn;
use super::{RepoError, RepoResult};
use crate::db::{ORDERS_TABLE, PRODUCTS_TABLE, Storage};
use crate::pricing;

/// Maximum quantity of a single line
pub const MAX_LINE_QUANTITY: u32 = 99;

#[derive(Clone)]
pub struct OrderRepository {
    storage: Storage,
}

impl OrderRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Orders newest first, optionally filtered by status
    pub fn find_all(&self, query: &OrderQuery) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .storage
            .list::<Order>(ORDERS_TABLE)?
            .into_iter()
            .filter(|o| query.status.is_none_or(|s| o.status == s))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        Ok(self.storage.get(ORDERS_TABLE, id)?)
    }

    /// Customer lookup: the email must match the order's email
    pub fn find_for_customer(&self, id: i64, email: &str) -> RepoResult<Order> {
        let email = normalize_email(email);
        self.find_by_id(id)?
            .filter(|o| o.customer_email == email)
            .ok_or_else(|| not_found(id))
    }

    /// Place an order
    ///
    /// Snapshots prices, decrements stock and redeems the coupon.
    pub fn checkout(&self, req: CheckoutRequest) -> RepoResult<Order> {
        if req.items.is_empty() {
            return Err(RepoError::rule(ErrorCode::OrderEmpty, "Order has no items"));
        }

        // Merge repeated products so stock is checked against the full quantity
        let mut quantities: BTreeMap<i64, u32> = BTreeMap::new();
        for item in &req.items {
            if item.quantity == 0 || item.quantity > MAX_LINE_QUANTITY {
                return Err(RepoError::rule(
                    ErrorCode::OrderInvalidQuantity,
                    format!("Quantity must be between 1 and {MAX_LINE_QUANTITY}"),
                ));
            }
            let total = quantities.entry(item.product_id).or_insert(0);
            *total = total.saturating_add(item.quantity);
        }
        if let Some((product_id, _)) = quantities.iter().find(|(_, q)| **q > MAX_LINE_QUANTITY) {
            return Err(RepoError::Rule(
                shared::AppError::with_message(
                    ErrorCode::OrderInvalidQuantity,
                    format!("Quantity must be between 1 and {MAX_LINE_QUANTITY}"),
                )
                .with_detail("product_id", *product_id),
            ));
        }

        let now = now_millis();
        let txn = self.storage.begin_write()?;

        let mut items = Vec::with_capacity(quantities.len());
        for (product_id, quantity) in quantities {
            let product: Product = Storage::get_txn(&txn, PRODUCTS_TABLE, product_id)?
                .filter(|p: &Product| p.is_active)
                .ok_or_else(|| {
                    RepoError::rule(
                        ErrorCode::ProductNotFound,
                        format!("Product {} not found", product_id),
                    )
                })?;
            if product.stock < i64::from(quantity) {
                return Err(RepoError::Rule(
                    shared::AppError::with_message(
                        ErrorCode::ProductOutOfStock,
                        format!("'{}' has only {} left", product.name, product.stock.max(0)),
                    )
                    .with_detail("product_id", product_id)
                    .with_detail("available", product.stock.max(0)),
                ));
            }
            adjust_stock_txn(&txn, product_id, -i64::from(quantity))?;
            items.push(pricing::line_item(&product, quantity)?);
        }

        let subtotal = pricing::subtotal(&items)?;
        let (coupon_code, discount) = match req.coupon_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                let (code, amount_off) = redeem_txn(&txn, code, subtotal, now)?;
                (Some(code), amount_off)
            }
            _ => (None, Decimal::ZERO),
        };
        let totals = pricing::totals(subtotal, discount);

        let order = Order {
            id: snowflake_id(),
            customer_name: req.customer_name.trim().to_string(),
            customer_email: normalize_email(&req.customer_email),
            shipping_address: req.shipping_address.trim().to_string(),
            items,
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            coupon_code,
            status: OrderStatus::Pending,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        Storage::put_txn(&txn, ORDERS_TABLE, order.id, &order)?;
        Storage::commit(txn)?;
        Ok(order)
    }

    /// Move an order along its lifecycle; cancelling restores stock
    pub fn update_status(
        &self,
        id: i64,
        update: OrderStatusUpdate,
        changed_by: Option<i64>,
    ) -> RepoResult<Order> {
        let txn = self.storage.begin_write()?;
        let mut order: Order =
            Storage::get_txn(&txn, ORDERS_TABLE, id)?.ok_or_else(|| not_found(id))?;

        let from = order.status;
        if !from.can_transition_to(update.status) {
            return Err(RepoError::Rule(
                shared::AppError::with_message(
                    ErrorCode::OrderInvalidTransition,
                    format!(
                        "Cannot change order from {} to {}",
                        from.as_str(),
                        update.status.as_str()
                    ),
                )
                .with_detail("from", from.as_str())
                .with_detail("to", update.status.as_str()),
            ));
        }

        if update.status == OrderStatus::Cancelled {
            restock(&txn, &order)?;
        }

        let now = now_millis();
        order.status = update.status;
        order.history.push(OrderStatusChange {
            from,
            to: update.status,
            changed_by,
            note: update.note,
            changed_at: now,
        });
        order.updated_at = now;

        Storage::put_txn(&txn, ORDERS_TABLE, id, &order)?;
        Storage::commit(txn)?;
        Ok(order)
    }
}

/// Return ordered quantities to stock; products deleted since are skipped
fn restock(txn: &WriteTransaction, order: &Order) -> RepoResult<()> {
    for item in &order.items {
        if Storage::get_txn::<Product>(txn, PRODUCTS_TABLE, item.product_id)?.is_some() {
            adjust_stock_txn(txn, item.product_id, i64::from(item.quantity))?;
        }
    }
    Ok(())
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(ErrorCode::OrderNotFound, format!("Order {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{
        BrandRepository, CategoryRepository, CouponRepository, ProductRepository,
    };
    use shared::models::{
        BrandCreate, CategoryCreate, CheckoutItem, CouponCreate, CouponDiscount, ProductCreate,
    };

    struct Fixture {
        storage: Storage,
        orders: OrderRepository,
        products: ProductRepository,
        tube: Product,
        lamp: Product,
    }

    fn fixture() -> Fixture {
        let storage = Storage::open_in_memory().unwrap();
        let category = CategoryRepository::new(storage.clone())
            .create(CategoryCreate {
                name: "Accessories".to_string(),
                description: None,
                sort_order: None,
            })
            .unwrap();
        let brand = BrandRepository::new(storage.clone())
            .create(BrandCreate {
                name: "Schwalbe".to_string(),
                website: None,
            })
            .unwrap();
        let products = ProductRepository::new(storage.clone());
        let make = |name: &str, sku: &str, cents: i64, stock: i64| {
            products
                .create(ProductCreate {
                    name: name.to_string(),
                    sku: sku.to_string(),
                    description: None,
                    category_id: category.id,
                    brand_id: brand.id,
                    supplier_id: None,
                    price: Decimal::new(cents, 2),
                    stock,
                })
                .unwrap()
        };
        let tube = make("Tube", "TB-1", 799, 10);
        let lamp = make("Lamp", "LP-1", 2500, 1);
        Fixture {
            orders: OrderRepository::new(storage.clone()),
            products,
            storage,
            tube,
            lamp,
        }
    }

    fn request(items: Vec<(i64, u32)>, coupon: Option<&str>) -> CheckoutRequest {
        CheckoutRequest {
            customer_name: "Lea".to_string(),
            customer_email: "Lea@Example.com".to_string(),
            shipping_address: "1 Cycle Lane".to_string(),
            items: items
                .into_iter()
                .map(|(product_id, quantity)| CheckoutItem {
                    product_id,
                    quantity,
                })
                .collect(),
            coupon_code: coupon.map(str::to_string),
        }
    }

    fn code(err: RepoError) -> ErrorCode {
        match err {
            RepoError::Rule(e) => e.code,
            other => panic!("unexpected error: {other}"),
        }
    }

    fn stock(f: &Fixture, id: i64) -> i64 {
        f.products.find_by_id(id).unwrap().unwrap().stock
    }

    #[test]
    fn test_checkout_snapshots_prices_and_decrements_stock() {
        let f = fixture();
        let order = f
            .orders
            .checkout(request(vec![(f.tube.id, 2), (f.lamp.id, 1)], None))
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.customer_email, "lea@example.com");
        assert_eq!(order.subtotal, Decimal::new(4098, 2));
        assert_eq!(order.total, order.subtotal);
        assert_eq!(stock(&f, f.tube.id), 8);
        assert_eq!(stock(&f, f.lamp.id), 0);
    }

    #[test]
    fn test_checkout_is_all_or_nothing() {
        let f = fixture();
        let err = f
            .orders
            .checkout(request(vec![(f.tube.id, 2), (f.lamp.id, 2)], None))
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ProductOutOfStock);
        assert_eq!(stock(&f, f.tube.id), 10);
        assert!(f.orders.find_all(&OrderQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_lines_are_merged() {
        let f = fixture();
        let err = f
            .orders
            .checkout(request(vec![(f.lamp.id, 1), (f.lamp.id, 1)], None))
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ProductOutOfStock);
    }

    #[test]
    fn test_merged_quantity_is_bounded() {
        let f = fixture();
        f.products.adjust_stock(f.tube.id, 500).unwrap();
        let err = f
            .orders
            .checkout(request(vec![(f.tube.id, 60), (f.tube.id, 60)], None))
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::OrderInvalidQuantity);
        assert_eq!(stock(&f, f.tube.id), 510);

        let order = f
            .orders
            .checkout(request(vec![(f.tube.id, 50), (f.tube.id, 49)], None))
            .unwrap();
        assert_eq!(order.items[0].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_checkout_rejects_empty_and_bad_quantity() {
        let f = fixture();
        assert_eq!(
            code(f.orders.checkout(request(vec![], None)).unwrap_err()),
            ErrorCode::OrderEmpty
        );
        assert_eq!(
            code(f.orders.checkout(request(vec![(f.tube.id, 0)], None)).unwrap_err()),
            ErrorCode::OrderInvalidQuantity
        );
        assert_eq!(
            code(f.orders.checkout(request(vec![(424242, 1)], None)).unwrap_err()),
            ErrorCode::ProductNotFound
        );
    }

    #[test]
    fn test_checkout_with_coupon() {
        let f = fixture();
        let coupons = CouponRepository::new(f.storage.clone());
        coupons
            .create(CouponCreate {
                code: "FIVE".to_string(),
                description: None,
                discount: CouponDiscount::Fixed(Decimal::new(500, 2)),
                min_order_total: None,
                max_uses: Some(1),
                expires_at: None,
            })
            .unwrap();

        let order = f
            .orders
            .checkout(request(vec![(f.tube.id, 1)], Some("five")))
            .unwrap();
        assert_eq!(order.coupon_code.as_deref(), Some("FIVE"));
        assert_eq!(order.discount, Decimal::new(500, 2));
        assert_eq!(order.total, Decimal::new(299, 2));

        // Exhausted coupon fails the whole checkout, stock untouched
        let err = f
            .orders
            .checkout(request(vec![(f.tube.id, 1)], Some("FIVE")))
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::CouponExhausted);
        assert_eq!(stock(&f, f.tube.id), 9);
    }

    #[test]
    fn test_status_flow_and_cancel_restock() {
        let f = fixture();
        let order = f
            .orders
            .checkout(request(vec![(f.tube.id, 3)], None))
            .unwrap();
        let to = |status| OrderStatusUpdate { status, note: None };

        let paid = f.orders.update_status(order.id, to(OrderStatus::Paid), Some(1)).unwrap();
        assert_eq!(paid.history.len(), 1);

        let err = f
            .orders
            .update_status(order.id, to(OrderStatus::Delivered), Some(1))
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::OrderInvalidTransition);

        let cancelled = f
            .orders
            .update_status(order.id, to(OrderStatus::Cancelled), Some(1))
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(stock(&f, f.tube.id), 10);

        let err = f
            .orders
            .update_status(order.id, to(OrderStatus::Paid), Some(1))
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::OrderInvalidTransition);
    }

    #[test]
    fn test_customer_lookup_requires_matching_email() {
        let f = fixture();
        let order = f.orders.checkout(request(vec![(f.tube.id, 1)], None)).unwrap();
        assert!(f.orders.find_for_customer(order.id, " LEA@example.com").is_ok());
        assert_eq!(
            code(f.orders.find_for_customer(order.id, "eve@example.com").unwrap_err()),
            ErrorCode::OrderNotFound
        );
    }
}
