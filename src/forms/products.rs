use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::ProductPayload;
use crate::domain::types::{
    CategoryId, ProductName, ProductPrice, ProductQuantity, ProductSku, ProductStatus,
    ProductWeight, TypeConstraintError,
};

/// Raw product save request, as submitted by a non-interactive caller.
///
/// The interactive path goes through [`ProductEditor`](crate::editor::ProductEditor)
/// instead, which accumulates field-level errors; this form rejects the
/// whole submission on the first constraint failure.
#[derive(Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub sku: String,
    pub price: f64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub weight: Option<f64>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub is_taxable: Option<bool>,
    pub allow_backorder: Option<bool>,
    #[validate(length(min = 1))]
    pub category_ids: Vec<i32>,
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ProductForm> for ProductPayload {
    type Error = ProductFormError;

    fn try_from(value: ProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        if !(value.price.is_finite() && value.price > 0.0) {
            return Err(ProductFormError::TypeConstraint(
                TypeConstraintError::NonPositiveNumber("price").to_string(),
            ));
        }

        let mut category_ids = value
            .category_ids
            .into_iter()
            .map(CategoryId::new)
            .collect::<Result<Vec<_>, _>>()?;
        category_ids.sort_unstable();
        category_ids.dedup();

        let status = match value.status {
            Some(status) => ProductStatus::try_from(status)?,
            None => ProductStatus::default(),
        };

        Ok(Self {
            name: ProductName::new(value.name)?,
            sku: ProductSku::new(value.sku)?,
            price: ProductPrice::new(value.price)?,
            quantity: ProductQuantity::new(value.quantity)?,
            weight: value.weight.map(ProductWeight::new).transpose()?,
            short_description: value.short_description.filter(|s| !s.trim().is_empty()),
            description: value.description.filter(|s| !s.trim().is_empty()),
            status,
            is_taxable: value.is_taxable.unwrap_or(false),
            allow_backorder: value.allow_backorder.unwrap_or(false),
            category_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> ProductForm {
        ProductForm {
            name: "Trail Shoe".to_string(),
            sku: "TS-01".to_string(),
            price: 59.9,
            quantity: 3,
            weight: None,
            short_description: None,
            description: None,
            status: None,
            is_taxable: None,
            allow_backorder: None,
            category_ids: vec![2, 1, 2],
        }
    }

    #[test]
    fn converts_and_deduplicates_category_ids() {
        let payload: ProductPayload = base_form().try_into().unwrap();
        assert_eq!(
            payload.category_ids,
            vec![CategoryId::new(1).unwrap(), CategoryId::new(2).unwrap()]
        );
        assert_eq!(payload.status, ProductStatus::Active);
    }

    #[test]
    fn rejects_non_positive_prices() {
        let mut form = base_form();
        form.price = 0.0;
        let payload: Result<ProductPayload, _> = form.try_into();
        assert!(matches!(
            payload.unwrap_err(),
            ProductFormError::TypeConstraint(_)
        ));
    }

    #[test]
    fn rejects_empty_category_lists() {
        let mut form = base_form();
        form.category_ids = vec![];
        let payload: Result<ProductPayload, _> = form.try_into();
        assert!(matches!(
            payload.unwrap_err(),
            ProductFormError::Validation(_)
        ));
    }

    #[test]
    fn parses_the_status_string() {
        let mut form = base_form();
        form.status = Some("Inactive".to_string());
        let payload: ProductPayload = form.try_into().unwrap();
        assert_eq!(payload.status, ProductStatus::Inactive);
    }
}
