//! In-memory repository backing tests and embedded use.
//!
//! Behaves like the REST backend the console normally talks to: stable
//! record order, soft-delete visibility rules, unique SKUs and server-side
//! paging.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::domain::category::{Category, NewCategory};
use crate::domain::customer::Customer;
use crate::domain::product::{Product, ProductPayload};
use crate::domain::types::{
    CategoryId, CategoryName, CustomerId, CustomerStatus, ProductId, ProductStatus,
};
use crate::pagination::Pagination;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, CustomerListQuery, CustomerReader,
    CustomerWriter, ProductListQuery, ProductReader, ProductWriter,
};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    products: Vec<Product>,
    customers: Vec<Customer>,
    next_category_id: i32,
    next_product_id: i32,
}

/// Thread-safe in-memory implementation of every repository trait.
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds categories, keeping their positions as the backend order.
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        let mut state = self.into_state();
        state.next_category_id = categories.iter().map(|c| c.id.get()).max().unwrap_or(0);
        state.categories = categories;
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        let mut state = self.into_state();
        state.next_product_id = products.iter().map(|p| p.id.get()).max().unwrap_or(0);
        state.products = products;
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with_customers(self, customers: Vec<Customer>) -> Self {
        let mut state = self.into_state();
        state.customers = customers;
        Self {
            state: Mutex::new(state),
        }
    }

    fn into_state(self) -> State {
        self.state
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state(&self) -> RepositoryResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| RepositoryError::Backend(e.to_string()))
    }
}

fn page<T>(items: Vec<T>, pagination: Option<&Pagination>) -> Vec<T> {
    match pagination {
        Some(p) => items
            .into_iter()
            .skip(p.offset())
            .take(p.per_page)
            .collect(),
        None => items,
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl CategoryReader for InMemoryRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        let state = self.state()?;

        let mut items: Vec<Category> = state
            .categories
            .iter()
            .filter(|c| query.include_deleted || !c.is_deleted())
            .cloned()
            .collect();
        if let Some(search) = &query.search {
            items.retain(|c| contains_ci(c.name.as_str(), search));
        }

        let total = items.len();
        Ok((total, page(items, query.pagination.as_ref())))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        let state = self.state()?;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }
}

impl CategoryWriter for InMemoryRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut state = self.state()?;

        state.next_category_id += 1;
        let stored = Category {
            id: CategoryId::new(state.next_category_id)?,
            name: category.name.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id,
            parent: None,
            created_at: category.created_at,
            updated_at: category.updated_at,
            deleted_at: None,
        };
        state.categories.push(stored.clone());
        Ok(stored)
    }

    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        description: Option<&str>,
        parent_id: Option<CategoryId>,
    ) -> RepositoryResult<usize> {
        let mut state = self.state()?;

        match state.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.name = name.clone();
                category.description = description.map(str::to_string);
                category.parent_id = parent_id;
                // The raw id becomes the single source of truth after an
                // explicit reparent.
                category.parent = None;
                category.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        let mut state = self.state()?;

        match state
            .categories
            .iter_mut()
            .find(|c| c.id == id && !c.is_deleted())
        {
            Some(category) => {
                category.deleted_at = Some(Utc::now().naive_utc());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn restore_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        let mut state = self.state()?;

        match state
            .categories
            .iter_mut()
            .find(|c| c.id == id && c.is_deleted())
        {
            Some(category) => {
                category.deleted_at = None;
                category.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn hard_delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        let mut state = self.state()?;

        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(before - state.categories.len())
    }
}

impl ProductReader for InMemoryRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let state = self.state()?;

        let mut items: Vec<Product> = state.products.to_vec();
        if let Some(search) = &query.search {
            items.retain(|p| {
                contains_ci(p.name.as_str(), search) || contains_ci(p.sku.as_str(), search)
            });
        }
        if let Some(status) = query.status {
            items.retain(|p| p.status == status);
        }
        if let Some(category_id) = query.category_id {
            items.retain(|p| p.category_ids.contains(&category_id));
        }

        let total = items.len();
        Ok((total, page(items, query.pagination.as_ref())))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.state()?;
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }
}

fn sku_taken(products: &[Product], sku: &str, exclude: Option<ProductId>) -> bool {
    products
        .iter()
        .filter(|p| Some(p.id) != exclude)
        .any(|p| p.sku.as_str().eq_ignore_ascii_case(sku))
}

impl ProductWriter for InMemoryRepository {
    fn create_product(&self, payload: &ProductPayload) -> RepositoryResult<Product> {
        let mut state = self.state()?;

        if sku_taken(&state.products, payload.sku.as_str(), None) {
            return Err(RepositoryError::Conflict(format!(
                "sku already in use: {}",
                payload.sku
            )));
        }

        state.next_product_id += 1;
        let now = Utc::now().naive_utc();
        let stored = Product {
            id: ProductId::new(state.next_product_id)?,
            name: payload.name.clone(),
            sku: payload.sku.clone(),
            price: payload.price,
            quantity: payload.quantity,
            weight: payload.weight,
            short_description: payload.short_description.clone(),
            description: payload.description.clone(),
            status: payload.status,
            is_taxable: payload.is_taxable,
            allow_backorder: payload.allow_backorder,
            category_ids: payload.category_ids.clone(),
            created_at: now,
            updated_at: now,
        };
        state.products.push(stored.clone());
        Ok(stored)
    }

    fn update_product(&self, id: ProductId, payload: &ProductPayload) -> RepositoryResult<usize> {
        let mut state = self.state()?;

        if sku_taken(&state.products, payload.sku.as_str(), Some(id)) {
            return Err(RepositoryError::Conflict(format!(
                "sku already in use: {}",
                payload.sku
            )));
        }

        match state.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.name = payload.name.clone();
                product.sku = payload.sku.clone();
                product.price = payload.price;
                product.quantity = payload.quantity;
                product.weight = payload.weight;
                product.short_description = payload.short_description.clone();
                product.description = payload.description.clone();
                product.status = payload.status;
                product.is_taxable = payload.is_taxable;
                product.allow_backorder = payload.allow_backorder;
                product.category_ids = payload.category_ids.clone();
                product.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl CustomerReader for InMemoryRepository {
    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        let state = self.state()?;

        let mut items: Vec<Customer> = state.customers.to_vec();
        if let Some(keyword) = &query.keyword {
            items.retain(|c| {
                contains_ci(&c.name, keyword)
                    || contains_ci(&c.username, keyword)
                    || contains_ci(&c.email, keyword)
            });
        }
        if let Some(status) = query.status {
            items.retain(|c| c.status == status);
        }

        let total = items.len();
        Ok((total, page(items, query.pagination.as_ref())))
    }

    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let state = self.state()?;
        Ok(state.customers.iter().find(|c| c.id == id).cloned())
    }
}

impl CustomerWriter for InMemoryRepository {
    fn block_customer(&self, id: CustomerId) -> RepositoryResult<usize> {
        let mut state = self.state()?;

        match state.customers.iter_mut().find(|c| c.id == id) {
            Some(customer) => {
                customer.status = CustomerStatus::Blocked;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn unblock_customer(&self, id: CustomerId) -> RepositoryResult<usize> {
        let mut state = self.state()?;

        match state.customers.iter_mut().find(|c| c.id == id) {
            Some(customer) => {
                customer.status = CustomerStatus::Active;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryName, OrderCount, ProductName, ProductPrice, ProductSku};
    use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
    use chrono::DateTime;

    fn category(id: i32, name: &str) -> Category {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            description: None,
            parent_id: None,
            parent: None,
            created_at: ts,
            updated_at: ts,
            deleted_at: None,
        }
    }

    fn customer(id: i32, name: &str, status: CustomerStatus) -> Customer {
        Customer {
            id: CustomerId::new(id).unwrap(),
            name: name.to_string(),
            username: name.to_lowercase().replace(' ', "."),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: None,
            address: None,
            status,
            total_orders: OrderCount::new(0).unwrap(),
            joined_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn payload(name: &str, sku: &str) -> ProductPayload {
        ProductPayload {
            name: ProductName::new(name).unwrap(),
            sku: ProductSku::new(sku).unwrap(),
            price: ProductPrice::new(10.0).unwrap(),
            quantity: Default::default(),
            weight: None,
            short_description: None,
            description: None,
            status: ProductStatus::Active,
            is_taxable: false,
            allow_backorder: false,
            category_ids: vec![CategoryId::new(1).unwrap()],
        }
    }

    #[test]
    fn soft_delete_hides_and_restore_reveals() {
        let repo =
            InMemoryRepository::new().with_categories(vec![category(1, "Tea"), category(2, "Pots")]);
        let id = CategoryId::new(1).unwrap();

        assert_eq!(repo.delete_category(id).unwrap(), 1);
        let (total, items) = repo.list_categories(CategoryListQuery::new()).unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id.get(), 2);

        // Soft-deleted records remain addressable.
        assert!(repo.get_category_by_id(id).unwrap().unwrap().is_deleted());

        assert_eq!(repo.restore_category(id).unwrap(), 1);
        let (total, _) = repo.list_categories(CategoryListQuery::new()).unwrap();
        assert_eq!(total, 2);
    }

    #[test]
    fn deleting_twice_affects_nothing_the_second_time() {
        let repo = InMemoryRepository::new().with_categories(vec![category(1, "Tea")]);
        let id = CategoryId::new(1).unwrap();

        assert_eq!(repo.delete_category(id).unwrap(), 1);
        assert_eq!(repo.delete_category(id).unwrap(), 0);
    }

    #[test]
    fn hard_delete_removes_the_record() {
        let repo = InMemoryRepository::new().with_categories(vec![category(1, "Tea")]);
        let id = CategoryId::new(1).unwrap();

        assert_eq!(repo.hard_delete_category(id).unwrap(), 1);
        assert!(repo.get_category_by_id(id).unwrap().is_none());
    }

    #[test]
    fn created_categories_get_fresh_ids() {
        let repo = InMemoryRepository::new().with_categories(vec![category(7, "Tea")]);
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();

        let stored = repo
            .create_category(&NewCategory {
                name: CategoryName::new("Pots").unwrap(),
                description: None,
                parent_id: None,
                created_at: ts,
                updated_at: ts,
            })
            .unwrap();
        assert_eq!(stored.id.get(), 8);
    }

    #[test]
    fn duplicate_sku_is_a_conflict() {
        let repo = InMemoryRepository::new();
        repo.create_product(&payload("Kettle", "KTL-1")).unwrap();

        let err = repo.create_product(&payload("Other", "ktl-1")).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn updating_keeps_own_sku_but_rejects_anothers() {
        let repo = InMemoryRepository::new();
        let first = repo.create_product(&payload("Kettle", "KTL-1")).unwrap();
        repo.create_product(&payload("Teapot", "TPT-1")).unwrap();

        assert_eq!(
            repo.update_product(first.id, &payload("Kettle v2", "KTL-1"))
                .unwrap(),
            1
        );
        let err = repo
            .update_product(first.id, &payload("Kettle v2", "TPT-1"))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn customer_filters_and_paging_compose() {
        let mut customers: Vec<Customer> = (1..=25)
            .map(|i| customer(i, &format!("Customer {i}"), CustomerStatus::Active))
            .collect();
        customers[0].status = CustomerStatus::Blocked;
        let repo = InMemoryRepository::new().with_customers(customers);

        let (total, items) = repo
            .list_customers(
                CustomerListQuery::default()
                    .status(CustomerStatus::Active)
                    .paginate(2, DEFAULT_ITEMS_PER_PAGE),
            )
            .unwrap();
        assert_eq!(total, 24);
        assert_eq!(items.len(), DEFAULT_ITEMS_PER_PAGE);

        let (total, _) = repo
            .list_customers(CustomerListQuery::default().keyword("customer 2"))
            .unwrap();
        // "Customer 2" plus "Customer 20".."Customer 25".
        assert_eq!(total, 7);
    }

    #[test]
    fn block_and_unblock_flip_status() {
        let repo = InMemoryRepository::new()
            .with_customers(vec![customer(1, "Ada", CustomerStatus::Active)]);
        let id = CustomerId::new(1).unwrap();

        assert_eq!(repo.block_customer(id).unwrap(), 1);
        assert!(repo.get_customer_by_id(id).unwrap().unwrap().is_blocked());

        assert_eq!(repo.unblock_customer(id).unwrap(), 1);
        assert!(!repo.get_customer_by_id(id).unwrap().unwrap().is_blocked());
    }
}
