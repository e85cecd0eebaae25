//! Product model
//!
//! A product is the only record the catalog keeps. Write payloads arrive as
//! [`ProductFields`], where every field is optional so the same type serves
//! create, full update and partial update.

use serde::{Deserialize, Serialize};

/// Product entity held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the store on create
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    /// Stock on hand (intended non-negative, not enforced)
    pub quantity: i64,
}

impl Product {
    /// Build a product from a create payload.
    ///
    /// Fields missing from the payload take their zero value; the catalog
    /// accepts incomplete payloads as-is.
    pub fn new(id: i64, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name.unwrap_or_default(),
            price: fields.price.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            quantity: fields.quantity.unwrap_or_default(),
        }
    }

    /// Shallow merge: every supplied field overwrites the stored one, every
    /// absent field is left untouched. The id never changes.
    pub fn apply(&mut self, fields: ProductFields) {
        if let Some(name) = fields.name {
            self.name = name;
        }
        if let Some(price) = fields.price {
            self.price = price;
        }
        if let Some(description) = fields.description {
            self.description = description;
        }
        if let Some(quantity) = fields.quantity {
            self.quantity = quantity;
        }
    }
}

/// Write payload for products.
///
/// Unknown keys (including a client-supplied `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl ProductFields {
    /// Payload carrying every field
    pub fn full(
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            description: Some(description.into()),
            quantity: Some(quantity),
        }
    }
}
