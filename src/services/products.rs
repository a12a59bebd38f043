use crate::domain::product::{Product, ProductPayload};
use crate::domain::types::{CategoryId, ProductId, ProductStatus};
use crate::dto::products::ProductDto;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    CategoryListQuery, CategoryReader, ProductListQuery, ProductReader, ProductWriter,
};

use super::{ServiceError, ServiceResult};

const SKU_TAKEN: &str = "This SKU is already taken. Please choose another.";

/// Core business logic for rendering the products page.
///
/// Applies keyword/status/category filters, pages the result and resolves
/// category names for each row.
pub fn show_products<R>(
    page: usize,
    keyword: Option<&str>,
    status: Option<ProductStatus>,
    category_id: Option<i32>,
    repo: &R,
) -> ServiceResult<Paginated<ProductDto>>
where
    R: ProductReader + CategoryReader,
{
    let mut query = ProductListQuery::default().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) {
        query = query.search(keyword);
    }
    if let Some(status) = status {
        query = query.status(status);
    }
    if let Some(raw) = category_id {
        let id = CategoryId::new(raw).map_err(|_| ServiceError::NotFound)?;
        query = query.category(id);
    }

    let (total, products) = match repo.list_products(query) {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Failed to list products: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let categories = match repo.list_categories(CategoryListQuery::new().include_deleted()) {
        Ok((_total, categories)) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let rows = products
        .iter()
        .map(|product| ProductDto::from_product(product, &categories))
        .collect();
    Ok(Paginated::from_total(
        rows,
        page,
        DEFAULT_ITEMS_PER_PAGE,
        total,
    ))
}

/// Fetches a product for seeding the editor in edit mode.
pub fn get_product<R>(product_id: i32, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_product_by_id(id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Creates or updates a product from a validated payload.
///
/// `product_id` is `None` in create mode. Every referenced category must
/// exist and be live; a duplicate SKU comes back as a form error so the
/// editor can pin it to the sku field.
pub fn save_product<R>(
    product_id: Option<ProductId>,
    payload: &ProductPayload,
    repo: &R,
) -> ServiceResult<ProductId>
where
    R: ProductReader + ProductWriter + CategoryReader,
{
    for category_id in &payload.category_ids {
        match repo.get_category_by_id(*category_id) {
            Ok(Some(category)) if !category.is_deleted() => {}
            Ok(_) => {
                return Err(ServiceError::Form(format!(
                    "Unknown category: {category_id}"
                )));
            }
            Err(e) => {
                log::error!("Failed to get category: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    match product_id {
        Some(id) => match repo.update_product(id, payload) {
            Ok(affected) if affected > 0 => Ok(id),
            Ok(_) => Err(ServiceError::NotFound),
            Err(RepositoryError::Conflict(_)) => Err(ServiceError::Form(SKU_TAKEN.to_string())),
            Err(e) => {
                log::error!("Failed to update product: {e}");
                Err(ServiceError::Internal)
            }
        },
        None => match repo.create_product(payload) {
            Ok(created) => Ok(created.id),
            Err(RepositoryError::Conflict(_)) => Err(ServiceError::Form(SKU_TAKEN.to_string())),
            Err(e) => {
                log::error!("Failed to create product: {e}");
                Err(ServiceError::Internal)
            }
        },
    }
}

/// Soft delete from the products table: a full update with only the status
/// switched to inactive.
pub fn deactivate_product<R>(product_id: i32, repo: &R) -> ServiceResult<bool>
where
    R: ProductReader + ProductWriter,
{
    set_product_status(product_id, ProductStatus::Inactive, repo)
}

pub fn reactivate_product<R>(product_id: i32, repo: &R) -> ServiceResult<bool>
where
    R: ProductReader + ProductWriter,
{
    set_product_status(product_id, ProductStatus::Active, repo)
}

fn set_product_status<R>(product_id: i32, status: ProductStatus, repo: &R) -> ServiceResult<bool>
where
    R: ProductReader + ProductWriter,
{
    let product = get_product(product_id, repo)?;
    let payload = ProductPayload::from_product_with_status(&product, status);

    match repo.update_product(product.id, &payload) {
        Ok(affected) => Ok(affected > 0),
        Err(e) => {
            log::error!("Failed to update product status: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::types::{
        CategoryId, CategoryName, ProductName, ProductPrice, ProductQuantity, ProductSku,
    };
    use crate::repository::memory::InMemoryRepository;
    use chrono::DateTime;

    fn sample_category(id: i32, name: &str) -> Category {
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

    fn sample_payload(name: &str, sku: &str) -> ProductPayload {
        ProductPayload {
            name: ProductName::new(name).unwrap(),
            sku: ProductSku::new(sku).unwrap(),
            price: ProductPrice::new(19.0).unwrap(),
            quantity: ProductQuantity::new(2).unwrap(),
            weight: None,
            short_description: None,
            description: None,
            status: ProductStatus::Active,
            is_taxable: false,
            allow_backorder: false,
            category_ids: vec![CategoryId::new(1).unwrap()],
        }
    }

    fn seeded_repo() -> InMemoryRepository {
        InMemoryRepository::new().with_categories(vec![
            sample_category(1, "Electronics"),
            sample_category(2, "Fashion"),
        ])
    }

    #[test]
    fn save_create_then_list_resolves_category_names() {
        let repo = seeded_repo();
        let id = save_product(None, &sample_payload("Kettle", "KTL-1"), &repo).unwrap();
        assert_eq!(id.get(), 1);

        let listing = show_products(1, None, None, None, &repo).unwrap();
        assert_eq!(listing.total, 1);
        assert_eq!(listing.items[0].categories, vec!["Electronics"]);
    }

    #[test]
    fn save_rejects_unknown_categories() {
        let repo = seeded_repo();
        let mut payload = sample_payload("Kettle", "KTL-1");
        payload.category_ids = vec![CategoryId::new(42).unwrap()];

        let err = save_product(None, &payload, &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn duplicate_sku_surfaces_as_a_form_error() {
        let repo = seeded_repo();
        save_product(None, &sample_payload("Kettle", "KTL-1"), &repo).unwrap();

        let err = save_product(None, &sample_payload("Other", "KTL-1"), &repo).unwrap_err();
        match err {
            ServiceError::Form(message) => assert!(message.contains("SKU")),
            other => panic!("expected form error, got {other:?}"),
        }
    }

    #[test]
    fn keyword_and_status_filters_narrow_the_listing() {
        let repo = seeded_repo();
        save_product(None, &sample_payload("Kettle", "KTL-1"), &repo).unwrap();
        save_product(None, &sample_payload("Teapot", "TPT-1"), &repo).unwrap();

        let listing = show_products(1, Some("tea"), None, None, &repo).unwrap();
        assert_eq!(listing.total, 1);
        assert_eq!(listing.items[0].name, "Teapot");

        let listing =
            show_products(1, None, Some(ProductStatus::Inactive), None, &repo).unwrap();
        assert_eq!(listing.total, 0);
    }

    #[test]
    fn deactivate_and_reactivate_round_trip() {
        let repo = seeded_repo();
        let id = save_product(None, &sample_payload("Kettle", "KTL-1"), &repo).unwrap();

        assert!(deactivate_product(id.get(), &repo).unwrap());
        let product = get_product(id.get(), &repo).unwrap();
        assert_eq!(product.status, ProductStatus::Inactive);

        assert!(reactivate_product(id.get(), &repo).unwrap());
        let product = get_product(id.get(), &repo).unwrap();
        assert_eq!(product.status, ProductStatus::Active);
    }

    #[test]
    fn updating_a_missing_product_is_not_found() {
        let repo = seeded_repo();
        let err = save_product(
            Some(ProductId::new(9).unwrap()),
            &sample_payload("Kettle", "KTL-1"),
            &repo,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }
}
