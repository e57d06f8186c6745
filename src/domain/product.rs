use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::tag::Tag;

/// Domain representation of a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Price represented in the smallest currency unit (for example cents).
    pub price_cents: i32,
    /// Quantity on hand.
    pub stock: i32,
    /// Identifier of the owning category, if any.
    pub category_id: Option<i32>,
    /// Eagerly loaded category record, when one is assigned.
    pub category: Option<Category>,
    /// Eagerly loaded tags attached to the product.
    pub tags: Vec<Tag>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Human-readable name of the product.
    pub name: String,
    /// Price represented in the smallest currency unit.
    pub price_cents: i32,
    /// Quantity on hand.
    pub stock: i32,
    /// Optional identifier of the owning category.
    pub category_id: Option<i32>,
}

impl NewProduct {
    /// Build a new product payload with the supplied details.
    pub fn new(name: impl Into<String>, price_cents: i32) -> Self {
        Self {
            name: name.into(),
            price_cents,
            stock: 0,
            category_id: None,
        }
    }

    /// Set the initial quantity on hand.
    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    /// Assign the product to a category.
    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Patch data applied when updating an existing product. Fields left as
/// `None` keep their stored value.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional price update in the smallest currency unit.
    pub price_cents: Option<i32>,
    /// Optional stock update.
    pub stock: Option<i32>,
    /// Optional category reassignment; `Some(None)` clears the category.
    pub category_id: Option<Option<i32>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            price_cents: None,
            stock: None,
            category_id: None,
            updated_at: now,
        }
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the product price.
    pub fn price_cents(mut self, price_cents: i32) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    /// Update the quantity on hand.
    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Reassign the category, using `None` to clear an existing assignment.
    pub fn category_id(mut self, category_id: Option<i32>) -> Self {
        self.category_id = Some(category_id);
        self
    }
}
