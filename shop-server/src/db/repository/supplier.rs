//! Supplier Repository

use shared::error::ErrorCode;
use shared::models::{Product, Supplier, SupplierCreate, SupplierUpdate};
use shared::util::{normalize_email, snowflake_id};

use super::{RepoError, RepoResult};
use crate::db::{PRODUCTS_TABLE, SUPPLIERS_TABLE, Storage};

#[derive(Clone)]
pub struct SupplierRepository {
    storage: Storage,
}

impl SupplierRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> RepoResult<Vec<Supplier>> {
        let mut suppliers: Vec<Supplier> = self.storage.list(SUPPLIERS_TABLE)?;
        suppliers.sort_by_key(|s| s.name.to_lowercase());
        Ok(suppliers)
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Supplier>> {
        Ok(self.storage.get(SUPPLIERS_TABLE, id)?)
    }

    pub fn create(&self, data: SupplierCreate) -> RepoResult<Supplier> {
        let supplier = Supplier {
            id: snowflake_id(),
            name: data.name.trim().to_string(),
            contact_email: data.contact_email.as_deref().map(normalize_email),
            phone: data.phone,
            is_active: true,
        };
        self.storage.put(SUPPLIERS_TABLE, supplier.id, &supplier)?;
        Ok(supplier)
    }

    pub fn update(&self, id: i64, data: SupplierUpdate) -> RepoResult<Supplier> {
        let txn = self.storage.begin_write()?;
        let mut supplier: Supplier =
            Storage::get_txn(&txn, SUPPLIERS_TABLE, id)?.ok_or_else(|| not_found(id))?;

        if let Some(name) = data.name {
            supplier.name = name.trim().to_string();
        }
        if let Some(email) = data.contact_email {
            supplier.contact_email = Some(normalize_email(&email));
        }
        if data.phone.is_some() {
            supplier.phone = data.phone;
        }
        if let Some(is_active) = data.is_active {
            supplier.is_active = is_active;
        }

        Storage::put_txn(&txn, SUPPLIERS_TABLE, id, &supplier)?;
        Storage::commit(txn)?;
        Ok(supplier)
    }

    pub fn delete(&self, id: i64) -> RepoResult<()> {
        let txn = self.storage.begin_write()?;
        if Storage::get_txn::<Supplier>(&txn, SUPPLIERS_TABLE, id)?.is_none() {
            return Err(not_found(id));
        }
        let products: Vec<Product> = Storage::list_txn(&txn, PRODUCTS_TABLE)?;
        if products.iter().any(|p| p.supplier_id == Some(id)) {
            return Err(RepoError::rule(
                ErrorCode::SupplierHasProducts,
                format!("Supplier {} is still used by products", id),
            ));
        }
        Storage::remove_txn(&txn, SUPPLIERS_TABLE, id)?;
        Storage::commit(txn)?;
        Ok(())
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(
        ErrorCode::SupplierNotFound,
        format!("Supplier {} not found", id),
    )
}
