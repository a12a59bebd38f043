//! Data-access boundary between the console's services and the backend.
//!
//! Services depend only on the reader/writer traits here; the production
//! collaborator is the REST backend, while [`memory::InMemoryRepository`]
//! backs tests and embedded use.

use crate::domain::category::{Category, NewCategory};
use crate::domain::customer::Customer;
use crate::domain::product::{Product, ProductPayload};
use crate::domain::types::{
    CategoryId, CategoryName, CustomerId, CustomerStatus, ProductId, ProductStatus,
};
use crate::pagination::Pagination;

pub mod errors;
pub mod memory;

use errors::RepositoryResult;

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Include soft-deleted records.
    pub include_deleted: bool,
    /// Case-insensitive name match.
    pub search: Option<String>,
    /// Pagination parameters; `None` fetches the full list, which the
    /// product editor needs for tree construction.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Query parameters used when listing or searching products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Case-insensitive match against name and SKU.
    pub search: Option<String>,
    pub status: Option<ProductStatus>,
    /// Restrict to products filed under this category.
    pub category_id: Option<CategoryId>,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Query parameters for the customer administration table.
#[derive(Debug, Clone, Default)]
pub struct CustomerListQuery {
    /// Case-insensitive match against name, username and email.
    pub keyword: Option<String>,
    pub status: Option<CustomerStatus>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options. Returns the total
    /// match count alongside the (possibly paged) items, preserving the
    /// backend's record order.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier, soft-deleted ones included.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category, returning the stored record.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Update name, description and parent reference.
    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        description: Option<&str>,
        parent_id: Option<CategoryId>,
    ) -> RepositoryResult<usize>;
    /// Soft delete: the record stays addressable and restorable.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
    /// Clear a previous soft delete.
    fn restore_category(&self, id: CategoryId) -> RepositoryResult<usize>;
    /// Remove the record permanently.
    fn hard_delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query parameters.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
///
/// SKU uniqueness is enforced here; violations surface as
/// [`errors::RepositoryError::Conflict`].
pub trait ProductWriter {
    fn create_product(&self, payload: &ProductPayload) -> RepositoryResult<Product>;
    fn update_product(&self, id: ProductId, payload: &ProductPayload) -> RepositoryResult<usize>;
}

/// Read-only operations for customer accounts.
pub trait CustomerReader {
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
}

/// The only customer mutations the back office performs.
pub trait CustomerWriter {
    fn block_customer(&self, id: CustomerId) -> RepositoryResult<usize>;
    fn unblock_customer(&self, id: CustomerId) -> RepositoryResult<usize>;
}
