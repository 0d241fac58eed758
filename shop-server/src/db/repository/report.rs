//! Report aggregation over orders, appointments and stock

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::models::{
    Appointment, LowStockProduct, Order, OrderStatus, SummaryReport,
};
use shared::util::now_millis;

use super::{ProductRepository, RepoResult, SettingsRepository};
use crate::db::{APPOINTMENTS_TABLE, ORDERS_TABLE, Storage};

#[derive(Clone)]
pub struct ReportRepository {
    storage: Storage,
}

impl ReportRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Dashboard summary; low-stock uses the configured threshold
    pub fn summary(&self) -> RepoResult<SummaryReport> {
        let orders: Vec<Order> = self.storage.list(ORDERS_TABLE)?;
        let appointments: Vec<Appointment> = self.storage.list(APPOINTMENTS_TABLE)?;
        let threshold = SettingsRepository::new(self.storage.clone())
            .get()?
            .low_stock_threshold;

        let mut orders_by_status: BTreeMap<String, u64> = OrderStatus::all()
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut revenue = Decimal::ZERO;
        for order in &orders {
            *orders_by_status
                .entry(order.status.as_str().to_string())
                .or_default() += 1;
            if order.status.is_revenue() {
                revenue += order.total;
            }
        }

        let mut open_appointments: BTreeMap<String, u64> = BTreeMap::new();
        for appointment in appointments.iter().filter(|a| a.status.is_open()) {
            *open_appointments
                .entry(appointment.status.as_str().to_string())
                .or_default() += 1;
        }

        let low_stock = ProductRepository::new(self.storage.clone())
            .low_stock(threshold)?
            .into_iter()
            .map(|p| LowStockProduct {
                id: p.id,
                name: p.name,
                sku: p.sku,
                stock: p.stock,
            })
            .collect();

        Ok(SummaryReport {
            orders_by_status,
            revenue: revenue.round_dp(2),
            open_appointments,
            low_stock,
            generated_at: now_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderStatusChange;

    fn order(id: i64, status: OrderStatus, total: i64) -> Order {
        Order {
            id,
            customer_name: "Ana".to_string(),
            customer_email: "ana@example.com".to_string(),
            shipping_address: "1 Chain St".to_string(),
            items: Vec::new(),
            subtotal: Decimal::new(total, 2),
            discount: Decimal::ZERO,
            total: Decimal::new(total, 2),
            coupon_code: None,
            status,
            history: Vec::<OrderStatusChange>::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_empty_summary_lists_every_status() {
        let repo = ReportRepository::new(Storage::open_in_memory().unwrap());
        let report = repo.summary().unwrap();
        assert_eq!(report.orders_by_status.len(), OrderStatus::all().len());
        assert!(report.orders_by_status.values().all(|n| *n == 0));
        assert_eq!(report.revenue, Decimal::ZERO);
        assert!(report.low_stock.is_empty());
    }

    #[test]
    fn test_revenue_excludes_pending_and_cancelled() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put(ORDERS_TABLE, 1, &order(1, OrderStatus::Paid, 10_000)).unwrap();
        storage.put(ORDERS_TABLE, 2, &order(2, OrderStatus::Delivered, 2_550)).unwrap();
        storage.put(ORDERS_TABLE, 3, &order(3, OrderStatus::Pending, 9_999)).unwrap();
        storage.put(ORDERS_TABLE, 4, &order(4, OrderStatus::Cancelled, 5_000)).unwrap();

        let report = ReportRepository::new(storage).summary().unwrap();
        assert_eq!(report.revenue, Decimal::new(12_550, 2));
        assert_eq!(report.orders_by_status["paid"], 1);
        assert_eq!(report.orders_by_status["cancelled"], 1);
    }
}
