use serde::{Deserialize, Serialize};

use shipdash_core::{Entity, ItemId};

use crate::error::{CartError, CartResult};
use crate::lookup::ProductDetails;

/// What the customer submits: a product link plus how many and any notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCandidate {
    pub source_url: String,
    pub quantity: u32,
    pub instructions: String,
}

impl ItemCandidate {
    pub fn new(source_url: impl Into<String>, quantity: u32) -> Self {
        Self {
            source_url: source_url.into(),
            quantity,
            instructions: String::new(),
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub(crate) fn validate(&self) -> CartResult<()> {
        if self.source_url.trim().is_empty() {
            return Err(CartError::invalid_input("source_url must not be empty"));
        }
        if self.quantity == 0 {
            return Err(CartError::invalid_input("quantity must be at least 1"));
        }
        Ok(())
    }
}

/// A cart line: the customer's request enriched with product details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    id: ItemId,
    source_url: String,
    quantity: u32,
    instructions: String,
    name: String,
    unit_price: f64,
    image_ref: String,
}

impl OrderItem {
    pub(crate) fn enriched(id: ItemId, candidate: ItemCandidate, details: ProductDetails) -> Self {
        Self {
            id,
            source_url: candidate.source_url.trim().to_string(),
            quantity: candidate.quantity,
            instructions: candidate.instructions,
            name: details.name,
            unit_price: details.unit_price,
            image_ref: details.image_ref,
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// `unit_price * quantity`, unrounded.
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

impl Entity for OrderItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}
