use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::product::Product;

/// Row of the products management table.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub quantity: i32,
    pub status: String,
    /// Names of the product's categories, in the catalog's list order.
    pub categories: Vec<String>,
}

impl ProductDto {
    pub fn from_product(product: &Product, categories: &[Category]) -> Self {
        let names = categories
            .iter()
            .filter(|c| product.category_ids.contains(&c.id))
            .map(|c| c.name.as_str().to_string())
            .collect();
        Self {
            id: product.id.get(),
            name: product.name.as_str().to_string(),
            sku: product.sku.as_str().to_string(),
            price: product.price.get(),
            quantity: product.quantity.get(),
            status: product.status.to_string(),
            categories: names,
        }
    }
}
