//! Editing-session state for the create/edit product screen.
//!
//! The editor owns raw field drafts, the category selection and the
//! field-level validation errors. Nothing is validated until
//! [`ProductEditor::finish`], mirroring the console's save-time checks;
//! editing a field clears that field's previous error immediately.

use crate::domain::product::{Product, ProductPayload};
use crate::domain::types::{
    CategoryId, ProductId, ProductName, ProductPrice, ProductQuantity, ProductSku, ProductStatus,
    ProductWeight,
};
use crate::tree::{CategoryForest, CategorySelection};

const NAME_REQUIRED: &str = "Product name is required";
const SKU_REQUIRED: &str = "SKU is required";
const SKU_TAKEN: &str = "This SKU is already taken. Please choose another.";
const PRICE_REQUIRED: &str = "Price must be greater than zero";
const CATEGORY_REQUIRED: &str = "Select at least one category";

/// Field-level validation errors surfaced next to the offending inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFormErrors {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
}

impl ProductFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.sku.is_none() && self.price.is_none() && self.category.is_none()
    }
}

/// Draft state for one product editing session.
///
/// Created empty for a new product or seeded from an existing one, and
/// discarded once [`Self::finish`] produces a payload or the user cancels.
#[derive(Debug, Clone, Default)]
pub struct ProductEditor {
    product_id: Option<ProductId>,
    name: String,
    sku: String,
    price: Option<f64>,
    quantity: i32,
    weight: Option<f64>,
    short_description: String,
    description: String,
    status: ProductStatus,
    is_taxable: bool,
    allow_backorder: bool,
    selection: CategorySelection,
    errors: ProductFormErrors,
}

impl ProductEditor {
    /// Fresh session for creating a product. Quantity starts at 1, the
    /// screen's default.
    pub fn new() -> Self {
        Self {
            quantity: 1,
            ..Self::default()
        }
    }

    /// Session seeded from an existing product, including its category
    /// associations (deduplicated).
    pub fn edit(product: &Product) -> Self {
        Self {
            product_id: Some(product.id),
            name: product.name.as_str().to_string(),
            sku: product.sku.as_str().to_string(),
            price: Some(product.price.get()),
            quantity: product.quantity.get(),
            weight: product.weight.map(ProductWeight::get),
            short_description: product.short_description.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            status: product.status,
            is_taxable: product.is_taxable,
            allow_backorder: product.allow_backorder,
            selection: CategorySelection::from_ids(product.category_ids.iter().copied()),
            errors: ProductFormErrors::default(),
        }
    }

    /// Identifier of the product being edited, `None` in create mode.
    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.errors.name = None;
    }

    pub fn set_sku(&mut self, sku: impl Into<String>) {
        self.sku = sku.into();
        self.errors.sku = None;
    }

    pub fn set_price(&mut self, price: Option<f64>) {
        self.price = price;
        self.errors.price = None;
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
    }

    pub fn set_weight(&mut self, weight: Option<f64>) {
        self.weight = weight;
    }

    pub fn set_short_description(&mut self, value: impl Into<String>) {
        self.short_description = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_status(&mut self, status: ProductStatus) {
        self.status = status;
    }

    pub fn set_taxable(&mut self, taxable: bool) {
        self.is_taxable = taxable;
    }

    pub fn set_allow_backorder(&mut self, allow: bool) {
        self.allow_backorder = allow;
    }

    /// Cascading category toggle, delegating to the selection set.
    ///
    /// Once the selection is non-empty any pending "category required"
    /// error is cleared; emptying the selection does not re-raise it, the
    /// requirement is only checked again at save time.
    pub fn toggle_category(&mut self, target: CategoryId, forest: &CategoryForest<'_>) {
        self.selection.toggle(target, forest);
        if !self.selection.is_empty() {
            self.errors.category = None;
        }
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn errors(&self) -> &ProductFormErrors {
        &self.errors
    }

    /// Records a duplicate-SKU rejection from the save collaborator against
    /// the sku field, the way a 400 response is surfaced on screen.
    pub fn mark_sku_taken(&mut self) {
        self.errors.sku = Some(SKU_TAKEN.to_string());
    }

    /// Validates the draft and builds the save payload.
    ///
    /// On failure the field errors are recorded on the editor and `None` is
    /// returned; save is simply not attempted.
    pub fn finish(&mut self) -> Option<ProductPayload> {
        let mut errors = ProductFormErrors::default();

        let name = match ProductName::new(self.name.clone()) {
            Ok(name) => Some(name),
            Err(_) => {
                errors.name = Some(NAME_REQUIRED.to_string());
                None
            }
        };
        let sku = match ProductSku::new(self.sku.clone()) {
            Ok(sku) => Some(sku),
            Err(_) => {
                errors.sku = Some(SKU_REQUIRED.to_string());
                None
            }
        };
        let price = match self.price {
            Some(value) if value > 0.0 => ProductPrice::new(value).ok(),
            _ => None,
        };
        if price.is_none() {
            errors.price = Some(PRICE_REQUIRED.to_string());
        }
        if self.selection.is_empty() {
            errors.category = Some(CATEGORY_REQUIRED.to_string());
        }

        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors = ProductFormErrors::default();

        Some(ProductPayload {
            // All three are Some once errors.is_empty() held above.
            name: name?,
            sku: sku?,
            price: price?,
            quantity: ProductQuantity::new(self.quantity.max(0)).unwrap_or_default(),
            weight: self.weight.and_then(|w| ProductWeight::new(w).ok()),
            short_description: non_empty(&self.short_description),
            description: non_empty(&self.description),
            status: self.status,
            is_taxable: self.is_taxable,
            allow_backorder: self.allow_backorder,
            category_ids: self.selection.ids(),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
