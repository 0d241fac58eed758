//! Product Repository

use redb::WriteTransaction;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    Brand, Category, MAX_AMOUNT, Product, ProductCreate, ProductQuery, ProductUpdate, Supplier,
};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult};
use crate::db::{BRANDS_TABLE, CATEGORIES_TABLE, PRODUCTS_TABLE, SUPPLIERS_TABLE, Storage};

#[derive(Clone)]
pub struct ProductRepository {
    storage: Storage,
}

impl ProductRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> RepoResult<Vec<Product>> {
        Ok(self.storage.list(PRODUCTS_TABLE)?)
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        Ok(self.storage.get(PRODUCTS_TABLE, id)?)
    }

    /// Filter products
    ///
    /// `q` matches name, SKU or description (case-insensitive).
    pub fn search(&self, query: &ProductQuery, active_only: bool) -> RepoResult<Vec<Product>> {
        let needle = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut products: Vec<Product> = self
            .find_all()?
            .into_iter()
            .filter(|p| !active_only || p.is_active)
            .filter(|p| query.category_id.is_none_or(|c| p.category_id == c))
            .filter(|p| query.brand_id.is_none_or(|b| p.brand_id == b))
            .filter(|p| match &needle {
                Some(n) => {
                    p.name.to_lowercase().contains(n)
                        || p.sku.to_lowercase().contains(n)
                        || p
                            .description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(n))
                }
                None => true,
            })
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    /// Products at or below `threshold` units
    pub fn low_stock(&self, threshold: i64) -> RepoResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .find_all()?
            .into_iter()
            .filter(|p| p.is_active && p.stock <= threshold)
            .collect();
        products.sort_by_key(|p| p.stock);
        Ok(products)
    }

    pub fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        check_price(data.price)?;
        if data.stock < 0 {
            return Err(RepoError::rule(
                ErrorCode::ValueOutOfRange,
                "Stock cannot be negative",
            ));
        }

        let txn = self.storage.begin_write()?;
        let existing: Vec<Product> = Storage::list_txn(&txn, PRODUCTS_TABLE)?;
        let sku = data.sku.trim().to_string();
        ensure_sku_free(&existing, &sku, None)?;
        check_references(&txn, data.category_id, data.brand_id, data.supplier_id)?;

        let now = now_millis();
        let product = Product {
            id: snowflake_id(),
            name: data.name.trim().to_string(),
            sku,
            description: data.description,
            category_id: data.category_id,
            brand_id: data.brand_id,
            supplier_id: data.supplier_id,
            price: data.price,
            stock: data.stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        Storage::put_txn(&txn, PRODUCTS_TABLE, product.id, &product)?;
        Storage::commit(txn)?;
        Ok(product)
    }

    pub fn update(&self, id: i64, data: ProductUpdate) -> RepoResult<Product> {
        let txn = self.storage.begin_write()?;
        let existing: Vec<Product> = Storage::list_txn(&txn, PRODUCTS_TABLE)?;
        let mut product = existing
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))?;

        if let Some(name) = data.name {
            product.name = name.trim().to_string();
        }
        if let Some(sku) = data.sku {
            let sku = sku.trim().to_string();
            ensure_sku_free(&existing, &sku, Some(id))?;
            product.sku = sku;
        }
        if data.description.is_some() {
            product.description = data.description;
        }
        if let Some(price) = data.price {
            check_price(price)?;
            product.price = price;
        }
        if let Some(category_id) = data.category_id {
            product.category_id = category_id;
        }
        if let Some(brand_id) = data.brand_id {
            product.brand_id = brand_id;
        }
        if data.supplier_id.is_some() {
            product.supplier_id = data.supplier_id;
        }
        if let Some(is_active) = data.is_active {
            product.is_active = is_active;
        }
        check_references(&txn, product.category_id, product.brand_id, product.supplier_id)?;

        product.updated_at = now_millis();
        Storage::put_txn(&txn, PRODUCTS_TABLE, id, &product)?;
        Storage::commit(txn)?;
        Ok(product)
    }

    /// Apply a stock delta; the result must not go below zero
    pub fn adjust_stock(&self, id: i64, delta: i64) -> RepoResult<Product> {
        let txn = self.storage.begin_write()?;
        let product = adjust_stock_txn(&txn, id, delta)?;
        Storage::commit(txn)?;
        Ok(product)
    }

    pub fn delete(&self, id: i64) -> RepoResult<()> {
        if !self.storage.remove(PRODUCTS_TABLE, id)? {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// Stock change inside a caller's transaction (checkout, restock on cancel)
pub(crate) fn adjust_stock_txn(txn: &WriteTransaction, id: i64, delta: i64) -> RepoResult<Product> {
    let mut product: Product =
        Storage::get_txn(txn, PRODUCTS_TABLE, id)?.ok_or_else(|| not_found(id))?;

    let next = product.stock.checked_add(delta).ok_or_else(|| {
        RepoError::rule(
            ErrorCode::ValueOutOfRange,
            format!("Stock change {} is out of range", delta),
        )
    })?;
    if next < 0 {
        return Err(RepoError::Rule(
            shared::AppError::with_message(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    product.sku,
                    product.stock,
                    delta.unsigned_abs()
                ),
            )
            .with_detail("product_id", id)
            .with_detail("available", product.stock),
        ));
    }
    product.stock = next;
    product.updated_at = now_millis();
    Storage::put_txn(txn, PRODUCTS_TABLE, id, &product)?;
    Ok(product)
}

fn check_price(price: Decimal) -> RepoResult<()> {
    if price <= Decimal::ZERO {
        return Err(RepoError::rule(
            ErrorCode::ProductInvalidPrice,
            "Price must be greater than zero",
        ));
    }
    if price > MAX_AMOUNT {
        return Err(RepoError::rule(
            ErrorCode::ProductInvalidPrice,
            format!("Price must not exceed {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

fn ensure_sku_free(existing: &[Product], sku: &str, except: Option<i64>) -> RepoResult<()> {
    if existing
        .iter()
        .any(|p| p.sku.eq_ignore_ascii_case(sku) && Some(p.id) != except)
    {
        return Err(RepoError::rule(
            ErrorCode::ProductSkuExists,
            format!("SKU '{}' already exists", sku),
        ));
    }
    Ok(())
}

fn check_references(
    txn: &WriteTransaction,
    category_id: i64,
    brand_id: i64,
    supplier_id: Option<i64>,
) -> RepoResult<()> {
    if Storage::get_txn::<Category>(txn, CATEGORIES_TABLE, category_id)?.is_none() {
        return Err(RepoError::rule(
            ErrorCode::CategoryNotFound,
            format!("Category {} not found", category_id),
        ));
    }
    if Storage::get_txn::<Brand>(txn, BRANDS_TABLE, brand_id)?.is_none() {
        return Err(RepoError::rule(
            ErrorCode::BrandNotFound,
            format!("Brand {} not found", brand_id),
        ));
    }
    if let Some(supplier_id) = supplier_id {
        if Storage::get_txn::<Supplier>(txn, SUPPLIERS_TABLE, supplier_id)?.is_none() {
            return Err(RepoError::rule(
                ErrorCode::SupplierNotFound,
                format!("Supplier {} not found", supplier_id),
            ));
        }
    }
    Ok(())
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(
        ErrorCode::ProductNotFound,
        format!("Product {} not found", id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{BrandRepository, CategoryRepository};
    use shared::models::{BrandCreate, CategoryCreate};

    struct Fixture {
        repo: ProductRepository,
        category_id: i64,
        brand_id: i64,
    }

    fn fixture() -> Fixture {
        let storage = Storage::open_in_memory().unwrap();
        let category = CategoryRepository::new(storage.clone())
            .create(CategoryCreate {
                name: "Components".to_string(),
                description: None,
                sort_order: None,
            })
            .unwrap();
        let brand = BrandRepository::new(storage.clone())
            .create(BrandCreate {
                name: "Shimano".to_string(),
                website: None,
            })
            .unwrap();
        Fixture {
            repo: ProductRepository::new(storage),
            category_id: category.id,
            brand_id: brand.id,
        }
    }

    fn payload(f: &Fixture, name: &str, sku: &str, price: i64) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            sku: sku.to_string(),
            description: None,
            category_id: f.category_id,
            brand_id: f.brand_id,
            supplier_id: None,
            price: Decimal::new(price, 2),
            stock: 5,
        }
    }

    fn code(err: RepoError) -> ErrorCode {
        match err {
            RepoError::Rule(e) => e.code,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_create_validates_price_sku_and_references() {
        let f = fixture();
        f.repo.create(payload(&f, "Chain", "CN-HG701", 3999)).unwrap();

        assert_eq!(
            code(f.repo.create(payload(&f, "Free", "FREE-1", 0)).unwrap_err()),
            ErrorCode::ProductInvalidPrice
        );
        assert_eq!(
            code(f.repo.create(payload(&f, "Chain 2", "cn-hg701", 1000)).unwrap_err()),
            ErrorCode::ProductSkuExists
        );

        let mut bad = payload(&f, "Ghost", "GHOST-1", 1000);
        bad.brand_id = 999;
        assert_eq!(code(f.repo.create(bad).unwrap_err()), ErrorCode::BrandNotFound);

        let mut bad = payload(&f, "Ghost", "GHOST-2", 1000);
        bad.supplier_id = Some(999);
        assert_eq!(
            code(f.repo.create(bad).unwrap_err()),
            ErrorCode::SupplierNotFound
        );
    }

    #[test]
    fn test_adjust_stock_never_negative() {
        let f = fixture();
        let p = f.repo.create(payload(&f, "Tube", "TB-700", 599)).unwrap();
        assert_eq!(f.repo.adjust_stock(p.id, 10).unwrap().stock, 15);
        assert_eq!(f.repo.adjust_stock(p.id, -15).unwrap().stock, 0);
        assert_eq!(
            code(f.repo.adjust_stock(p.id, -1).unwrap_err()),
            ErrorCode::InsufficientStock
        );
        assert_eq!(f.repo.find_by_id(p.id).unwrap().unwrap().stock, 0);
    }

    #[test]
    fn test_adjust_stock_extreme_deltas() {
        let f = fixture();
        let p = f.repo.create(payload(&f, "Spoke", "SP-260", 50)).unwrap();
        assert_eq!(
            code(f.repo.adjust_stock(p.id, i64::MAX).unwrap_err()),
            ErrorCode::ValueOutOfRange
        );
        assert_eq!(
            code(f.repo.adjust_stock(p.id, i64::MIN).unwrap_err()),
            ErrorCode::InsufficientStock
        );
        assert_eq!(f.repo.find_by_id(p.id).unwrap().unwrap().stock, 5);
    }

    #[test]
    fn test_price_upper_bound() {
        let f = fixture();
        let mut p = payload(&f, "Frame", "FR-1", 0);
        p.price = MAX_AMOUNT;
        let frame = f.repo.create(p).unwrap();

        let mut p = payload(&f, "Gold frame", "FR-2", 0);
        p.price = Decimal::MAX;
        assert_eq!(code(f.repo.create(p).unwrap_err()), ErrorCode::ProductInvalidPrice);

        let update = ProductUpdate {
            price: Some(MAX_AMOUNT + Decimal::ONE),
            ..Default::default()
        };
        assert_eq!(
            code(f.repo.update(frame.id, update).unwrap_err()),
            ErrorCode::ProductInvalidPrice
        );
    }

    #[test]
    fn test_search_filters() {
        let f = fixture();
        f.repo.create(payload(&f, "Brake pads", "BP-01", 1500)).unwrap();
        let cassette = f.repo.create(payload(&f, "Cassette", "CS-11", 5000)).unwrap();
        f.repo
            .update(
                cassette.id,
                ProductUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        let query = ProductQuery {
            q: Some("BRAKE".to_string()),
            ..Default::default()
        };
        assert_eq!(f.repo.search(&query, true).unwrap().len(), 1);

        let all = ProductQuery {
            brand_id: Some(f.brand_id),
            ..Default::default()
        };
        assert_eq!(f.repo.search(&all, true).unwrap().len(), 1);
        assert_eq!(f.repo.search(&all, false).unwrap().len(), 2);
    }

    #[test]
    fn test_low_stock() {
        let f = fixture();
        let p = f.repo.create(payload(&f, "Grips", "GR-1", 1200)).unwrap();
        assert!(f.repo.low_stock(3).unwrap().is_empty());
        f.repo.adjust_stock(p.id, -3).unwrap();
        assert_eq!(f.repo.low_stock(3).unwrap().len(), 1);
    }
}
