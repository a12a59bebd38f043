use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CustomerStatus, TypeConstraintError};

/// Raw filter state of the customers table.
#[derive(Deserialize, Validate, Default)]
pub struct CustomerFilterForm {
    pub keyword: Option<String>,
    /// `ALL`, empty or absent means no status filter.
    pub status: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFilterPayload {
    pub keyword: Option<String>,
    pub status: Option<CustomerStatus>,
    pub page: usize,
}

#[derive(Debug, Error)]
pub enum CustomerFilterFormError {
    #[error("Customer filter validation failed: {0}")]
    Validation(String),
    #[error("Customer filter contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CustomerFilterFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CustomerFilterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CustomerFilterForm> for CustomerFilterPayload {
    type Error = CustomerFilterFormError;

    fn try_from(value: CustomerFilterForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let keyword = value
            .keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let status = match value.status.as_deref().map(str::trim) {
            None | Some("") | Some("ALL") => None,
            Some(other) => Some(CustomerStatus::try_from(other)?),
        };

        Ok(Self {
            keyword,
            status,
            page: value.page.unwrap_or(1),
        })
    }
}
