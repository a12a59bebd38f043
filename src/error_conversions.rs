//! Conversions that let `?` carry errors across layer boundaries.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::{AddCategoryFormError, UpdateCategoryFormError};
use crate::forms::customers::CustomerFilterFormError;
use crate::forms::products::ProductFormError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::ValidationError(value.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl From<AddCategoryFormError> for ServiceError {
    fn from(value: AddCategoryFormError) -> Self {
        Self::Form(value.to_string())
    }
}

impl From<UpdateCategoryFormError> for ServiceError {
    fn from(value: UpdateCategoryFormError) -> Self {
        Self::Form(value.to_string())
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(value: ProductFormError) -> Self {
        Self::Form(value.to_string())
    }
}

impl From<CustomerFilterFormError> for ServiceError {
    fn from(value: CustomerFilterFormError) -> Self {
        Self::Form(value.to_string())
    }
}
