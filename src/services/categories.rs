use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryTreeRowDto};
use crate::forms::categories::{AddCategoryFormPayload, UpdateCategoryFormPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter};
use crate::tree::{CategoryForest, CategorySelection};

use super::{ServiceError, ServiceResult};

fn fetch_all_categories<R>(repo: &R, include_deleted: bool) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    let mut query = CategoryListQuery::new();
    if include_deleted {
        query = query.include_deleted();
    }
    match repo.list_categories(query) {
        Ok((_total, categories)) => Ok(categories),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Core business logic for rendering the categories page.
///
/// Fetches one page of categories and resolves each row's parent name
/// against the full list, since a parent may live on another page.
pub fn show_categories<R>(
    page: usize,
    include_deleted: bool,
    repo: &R,
) -> ServiceResult<Paginated<CategoryDto>>
where
    R: CategoryReader,
{
    let mut query = CategoryListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if include_deleted {
        query = query.include_deleted();
    }

    let (total, items) = match repo.list_categories(query) {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let all = fetch_all_categories(repo, true)?;
    let rows = items
        .iter()
        .map(|category| CategoryDto::from_category(category, &all))
        .collect();
    Ok(Paginated::from_total(
        rows,
        page,
        DEFAULT_ITEMS_PER_PAGE,
        total,
    ))
}

/// Checkbox rows for the product editor's category selector.
///
/// Fetches the full live list, rebuilds the forest and walks it pre-order
/// with the session's current selection.
pub fn category_tree<R>(
    selection: &CategorySelection,
    repo: &R,
) -> ServiceResult<Vec<CategoryTreeRowDto>>
where
    R: CategoryReader,
{
    let categories = fetch_all_categories(repo, false)?;
    let forest = CategoryForest::new(&categories);
    Ok(forest
        .rows(selection)
        .iter()
        .map(CategoryTreeRowDto::from)
        .collect())
}

/// Full live category list for callers that drive the forest themselves.
pub fn list_for_editor<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    fetch_all_categories(repo, false)
}

pub fn add_category<R>(payload: AddCategoryFormPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    if let Some(parent_id) = payload.parent_id {
        ensure_category_exists(parent_id, repo)?;
    }

    match repo.create_category(&payload.into_new_category()) {
        Ok(created) => {
            let all = fetch_all_categories(repo, true)?;
            Ok(CategoryDto::from_category(&created, &all))
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(payload: UpdateCategoryFormPayload, repo: &R) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_category_exists(payload.category_id, repo)?;

    if let Some(parent_id) = payload.parent_id {
        if parent_id == payload.category_id {
            return Err(ServiceError::Form(
                "A category cannot be its own parent.".to_string(),
            ));
        }
        ensure_category_exists(parent_id, repo)?;
    }

    match repo.update_category(
        payload.category_id,
        &payload.name,
        payload.description.as_deref(),
        payload.parent_id,
    ) {
        Ok(affected) => Ok(affected > 0),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Ok(false)
        }
    }
}

/// Soft-deletes a category; it stays listed under "include deleted" and can
/// be restored.
pub fn delete_category<R>(category_id: i32, repo: &R) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter,
{
    let id = valid_id(category_id)?;
    ensure_category_exists(id, repo)?;

    match repo.delete_category(id) {
        Ok(affected) => Ok(affected > 0),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Ok(false)
        }
    }
}

pub fn restore_category<R>(category_id: i32, repo: &R) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter,
{
    let id = valid_id(category_id)?;
    ensure_category_exists(id, repo)?;

    match repo.restore_category(id) {
        Ok(affected) => Ok(affected > 0),
        Err(e) => {
            log::error!("Failed to restore category: {e}");
            Ok(false)
        }
    }
}

pub fn hard_delete_category<R>(category_id: i32, repo: &R) -> ServiceResult<bool>
where
    R: CategoryReader + CategoryWriter,
{
    let id = valid_id(category_id)?;
    ensure_category_exists(id, repo)?;

    match repo.hard_delete_category(id) {
        Ok(affected) => Ok(affected > 0),
        Err(e) => {
            log::error!("Failed to hard-delete category: {e}");
            Ok(false)
        }
    }
}

fn valid_id(raw: i32) -> ServiceResult<CategoryId> {
    CategoryId::new(raw).map_err(|_| ServiceError::NotFound)
}

fn ensure_category_exists<R>(id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}
