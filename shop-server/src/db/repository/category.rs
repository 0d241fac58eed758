//! Category Repository

use shared::error::ErrorCode;
use shared::models::{Category, CategoryCreate, CategoryUpdate, Product};
use shared::util::snowflake_id;

use super::{RepoError, RepoResult};
use crate::db::{CATEGORIES_TABLE, PRODUCTS_TABLE, Storage};

#[derive(Clone)]
pub struct CategoryRepository {
    storage: Storage,
}

impl CategoryRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// All categories ordered by `sort_order`, then name
    pub fn find_all(&self) -> RepoResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.storage.list(CATEGORIES_TABLE)?;
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    pub fn find_active(&self) -> RepoResult<Vec<Category>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|c| c.is_active)
            .collect())
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>> {
        Ok(self.storage.get(CATEGORIES_TABLE, id)?)
    }

    pub fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let txn = self.storage.begin_write()?;
        let existing: Vec<Category> = Storage::list_txn(&txn, CATEGORIES_TABLE)?;
        let name = data.name.trim().to_string();
        ensure_name_free(&existing, &name, None)?;

        let category = Category {
            id: snowflake_id(),
            name,
            description: data.description,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };
        Storage::put_txn(&txn, CATEGORIES_TABLE, category.id, &category)?;
        Storage::commit(txn)?;
        Ok(category)
    }

    pub fn update(&self, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
        let txn = self.storage.begin_write()?;
        let existing: Vec<Category> = Storage::list_txn(&txn, CATEGORIES_TABLE)?;
        let mut category = existing
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))?;

        if let Some(name) = data.name {
            let name = name.trim().to_string();
            ensure_name_free(&existing, &name, Some(id))?;
            category.name = name;
        }
        if data.description.is_some() {
            category.description = data.description;
        }
        if let Some(sort_order) = data.sort_order {
            category.sort_order = sort_order;
        }
        if let Some(is_active) = data.is_active {
            category.is_active = is_active;
        }

        Storage::put_txn(&txn, CATEGORIES_TABLE, id, &category)?;
        Storage::commit(txn)?;
        Ok(category)
    }

    /// Delete a category no product refers to
    pub fn delete(&self, id: i64) -> RepoResult<()> {
        let txn = self.storage.begin_write()?;
        if Storage::get_txn::<Category>(&txn, CATEGORIES_TABLE, id)?.is_none() {
            return Err(not_found(id));
        }
        let products: Vec<Product> = Storage::list_txn(&txn, PRODUCTS_TABLE)?;
        let in_use = products.iter().filter(|p| p.category_id == id).count();
        if in_use > 0 {
            return Err(RepoError::rule(
                ErrorCode::CategoryHasProducts,
                format!("Category {} still has {} product(s)", id, in_use),
            ));
        }
        Storage::remove_txn(&txn, CATEGORIES_TABLE, id)?;
        Storage::commit(txn)?;
        Ok(())
    }
}

fn ensure_name_free(existing: &[Category], name: &str, except: Option<i64>) -> RepoResult<()> {
    if existing
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(name) && Some(c.id) != except)
    {
        return Err(RepoError::rule(
            ErrorCode::CategoryNameExists,
            format!("Category '{}' already exists", name),
        ));
    }
    Ok(())
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(
        ErrorCode::CategoryNotFound,
        format!("Category {} not found", id),
    )
}
