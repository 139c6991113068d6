use serde::{Deserialize, Serialize};

use super::InventoryError;

/// A stocked good held in exactly one bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub description: String,
    /// On-hand count, never negative.
    pub quantity: i32,
}

impl Item {
    pub fn new(id: i32, description: impl Into<String>, quantity: i32) -> Self {
        Self {
            id,
            description: description.into(),
            quantity,
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Item as submitted by a client. Every field is optional so that a missing
/// field is reported as a validation failure instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub id: Option<i32>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
}

impl NewItem {
    pub fn into_item(self) -> Result<Item, InventoryError> {
        let id = match self.id {
            Some(id) if id > 0 => id,
            _ => return Err(InventoryError::Validation("item id must be a positive integer".into())),
        };
        let description = match self.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => {
                return Err(InventoryError::Validation(format!(
                    "item {} description must not be empty",
                    id
                )))
            }
        };
        let quantity = match self.quantity {
            Some(q) if q >= 0 => q,
            Some(q) => return Err(InventoryError::InvalidQuantity(q)),
            None => {
                return Err(InventoryError::Validation(format!(
                    "item {} quantity is required",
                    id
                )))
            }
        };

        Ok(Item {
            id,
            description,
            quantity,
        })
    }
}
