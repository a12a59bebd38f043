use crate::domain::types::CustomerId;
use crate::dto::customers::CustomerDto;
use crate::forms::customers::CustomerFilterPayload;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter};

use super::{ServiceError, ServiceResult};

/// Core business logic for rendering the customers page.
pub fn show_customers<R>(
    filter: &CustomerFilterPayload,
    repo: &R,
) -> ServiceResult<Paginated<CustomerDto>>
where
    R: CustomerReader,
{
    let mut query = CustomerListQuery::default().paginate(filter.page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(keyword) = &filter.keyword {
        query = query.keyword(keyword.clone());
    }
    if let Some(status) = filter.status {
        query = query.status(status);
    }

    let (total, items) = match repo.list_customers(query) {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Failed to list customers: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let rows = items.into_iter().map(CustomerDto::from).collect();
    Ok(Paginated::from_total(
        rows,
        filter.page,
        DEFAULT_ITEMS_PER_PAGE,
        total,
    ))
}

pub fn get_customer<R>(customer_id: i32, repo: &R) -> ServiceResult<CustomerDto>
where
    R: CustomerReader,
{
    let id = valid_id(customer_id)?;
    match repo.get_customer_by_id(id) {
        Ok(Some(customer)) => Ok(CustomerDto::from(customer)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get customer: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn block_customer<R>(customer_id: i32, repo: &R) -> ServiceResult<bool>
where
    R: CustomerReader + CustomerWriter,
{
    let id = valid_id(customer_id)?;
    ensure_customer_exists(id, repo)?;
    match repo.block_customer(id) {
        Ok(affected) => Ok(affected > 0),
        Err(e) => {
            log::error!("Failed to block customer: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn unblock_customer<R>(customer_id: i32, repo: &R) -> ServiceResult<bool>
where
    R: CustomerReader + CustomerWriter,
{
    let id = valid_id(customer_id)?;
    ensure_customer_exists(id, repo)?;
    match repo.unblock_customer(id) {
        Ok(affected) => Ok(affected > 0),
        Err(e) => {
            log::error!("Failed to unblock customer: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn valid_id(raw: i32) -> ServiceResult<CustomerId> {
    CustomerId::new(raw).map_err(|_| ServiceError::NotFound)
}

fn ensure_customer_exists<R>(id: CustomerId, repo: &R) -> ServiceResult<()>
where
    R: CustomerReader,
{
    match repo.get_customer_by_id(id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get customer: {e}");
            Err(ServiceError::Internal)
        }
    }
}
