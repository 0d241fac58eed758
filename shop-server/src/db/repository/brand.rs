//! Brand Repository

use shared::error::ErrorCode;
use shared::models::{Brand, BrandCreate, BrandUpdate, Product};
use shared::util::snowflake_id;

use super::{RepoError, RepoResult};
use crate::db::{BRANDS_TABLE, PRODUCTS_TABLE, Storage};

#[derive(Clone)]
pub struct BrandRepository {
    storage: Storage,
}

impl BrandRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> RepoResult<Vec<Brand>> {
        let mut brands: Vec<Brand> = self.storage.list(BRANDS_TABLE)?;
        brands.sort_by_key(|b| b.name.to_lowercase());
        Ok(brands)
    }

    pub fn find_active(&self) -> RepoResult<Vec<Brand>> {
        Ok(self.find_all()?.into_iter().filter(|b| b.is_active).collect())
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Brand>> {
        Ok(self.storage.get(BRANDS_TABLE, id)?)
    }

    pub fn create(&self, data: BrandCreate) -> RepoResult<Brand> {
        let txn = self.storage.begin_write()?;
        let existing: Vec<Brand> = Storage::list_txn(&txn, BRANDS_TABLE)?;
        let name = data.name.trim().to_string();
        ensure_name_free(&existing, &name, None)?;

        let brand = Brand {
            id: snowflake_id(),
            name,
            website: data.website,
            is_active: true,
        };
        Storage::put_txn(&txn, BRANDS_TABLE, brand.id, &brand)?;
        Storage::commit(txn)?;
        Ok(brand)
    }

    pub fn update(&self, id: i64, data: BrandUpdate) -> RepoResult<Brand> {
        let txn = self.storage.begin_write()?;
        let existing: Vec<Brand> = Storage::list_txn(&txn, BRANDS_TABLE)?;
        let mut brand = existing
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))?;

        if let Some(name) = data.name {
            let name = name.trim().to_string();
            ensure_name_free(&existing, &name, Some(id))?;
            brand.name = name;
        }
        if data.website.is_some() {
            brand.website = data.website;
        }
        if let Some(is_active) = data.is_active {
            brand.is_active = is_active;
        }

        Storage::put_txn(&txn, BRANDS_TABLE, id, &brand)?;
        Storage::commit(txn)?;
        Ok(brand)
    }

    pub fn delete(&self, id: i64) -> RepoResult<()> {
        let txn = self.storage.begin_write()?;
        if Storage::get_txn::<Brand>(&txn, BRANDS_TABLE, id)?.is_none() {
            return Err(not_found(id));
        }
        let products: Vec<Product> = Storage::list_txn(&txn, PRODUCTS_TABLE)?;
        if products.iter().any(|p| p.brand_id == id) {
            return Err(RepoError::rule(
                ErrorCode::BrandHasProducts,
                format!("Brand {} is still used by products", id),
            ));
        }
        Storage::remove_txn(&txn, BRANDS_TABLE, id)?;
        Storage::commit(txn)?;
        Ok(())
    }
}

fn ensure_name_free(existing: &[Brand], name: &str, except: Option<i64>) -> RepoResult<()> {
    if existing
        .iter()
        .any(|b| b.name.eq_ignore_ascii_case(name) && Some(b.id) != except)
    {
        return Err(RepoError::rule(
            ErrorCode::BrandNameExists,
            format!("Brand '{}' already exists", name),
        ));
    }
    Ok(())
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(ErrorCode::BrandNotFound, format!("Brand {} not found", id))
}
