use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 255;
/// Upper bound on an accepted price, in currency units.
const PRICE_MAX: f64 = 10_000_000.0;

/// Result type returned by the product payload helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
}

/// JSON body accepted when creating a product.
///
/// `tagIds`, when present and non-empty, lists the tags to associate with the
/// created product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Price in currency units, converted to cents for storage.
    #[validate(range(min = 0.0, max = PRICE_MAX))]
    pub price: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
    #[serde(default)]
    pub tag_ids: Option<Vec<i32>>,
}

impl CreateProductPayload {
    /// Validates and sanitizes the payload into a domain `NewProduct` plus the
    /// requested tag-id list (empty when `tagIds` was absent).
    pub fn into_new_product(self) -> ProductFormResult<(NewProduct, Vec<i32>)> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let mut new_product = NewProduct::new(name, price_to_cents(self.price));
        if let Some(stock) = self.stock {
            new_product = new_product.with_stock(stock);
        }
        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category_id(category_id);
        }

        Ok((new_product, self.tag_ids.unwrap_or_default()))
    }
}

/// JSON body accepted when updating a product. Absent fields keep their
/// stored value; a present `tagIds` list requests tag reconciliation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = PRICE_MAX))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
    #[serde(default)]
    pub tag_ids: Option<Vec<i32>>,
}

impl UpdateProductPayload {
    /// Validates and sanitizes the payload into a domain `UpdateProduct` patch
    /// plus the requested tag-id list, when one was supplied.
    pub fn into_update_product(self) -> ProductFormResult<(UpdateProduct, Option<Vec<i32>>)> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(name) = self.name.as_deref() {
            let name = sanitize_inline_text(name);
            if name.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            updates = updates.name(name);
        }
        if let Some(price) = self.price {
            updates = updates.price_cents(price_to_cents(price));
        }
        if let Some(stock) = self.stock {
            updates = updates.stock(stock);
        }
        if let Some(category_id) = self.category_id {
            updates = updates.category_id(Some(category_id));
        }

        Ok((updates, self.tag_ids))
    }
}

fn price_to_cents(price: f64) -> i32 {
    (price * 100.0).round() as i32
}
