use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, ProductId, ProductName, ProductPrice, ProductQuantity, ProductSku, ProductStatus,
    ProductWeight,
};

/// Canonical product record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub sku: ProductSku,
    pub price: ProductPrice,
    pub quantity: ProductQuantity,
    pub weight: Option<ProductWeight>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub is_taxable: bool,
    pub allow_backorder: bool,
    /// Categories the product is filed under. May contain duplicates when
    /// the backend denormalizes associations; consumers deduplicate.
    pub category_ids: Vec<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Validated save request for creating or updating a [`Product`].
///
/// Produced either by the interactive product editor or by converting a raw
/// [`ProductForm`](crate::forms::products::ProductForm); its `category_ids`
/// carry the editor's category selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPayload {
    pub name: ProductName,
    pub sku: ProductSku,
    pub price: ProductPrice,
    pub quantity: ProductQuantity,
    pub weight: Option<ProductWeight>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub is_taxable: bool,
    pub allow_backorder: bool,
    pub category_ids: Vec<CategoryId>,
}

impl ProductPayload {
    /// Payload that rewrites `product` as-is with a different status.
    ///
    /// Backs the deactivate/reactivate actions, which are full updates with
    /// only the status changed.
    pub fn from_product_with_status(product: &Product, status: ProductStatus) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
            quantity: product.quantity,
            weight: product.weight,
            short_description: product.short_description.clone(),
            description: product.description.clone(),
            status,
            is_taxable: product.is_taxable,
            allow_backorder: product.allow_backorder,
            category_ids: product.category_ids.clone(),
        }
    }
}
