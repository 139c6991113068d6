use serde::{Deserialize, Serialize};

use super::{InventoryError, Item, NewItem};

/// A storage container and the items it holds. Items are kept in insertion
/// order; their ids are unique within the bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub id: i32,
    pub description: String,
    pub items: Vec<Item>,
}

impl Bin {
    pub fn new(id: i32, description: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id,
            description: description.into(),
            items,
        }
    }

    pub fn get_item(&self, item_id: i32) -> Result<&Item, InventoryError> {
        self.items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or(InventoryError::ItemNotFound(item_id))
    }

    fn get_item_mut(&mut self, item_id: i32) -> Result<&mut Item, InventoryError> {
        self.items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(InventoryError::ItemNotFound(item_id))
    }

    /// Overwrites the quantity of `item_id` with `new_count`.
    ///
    /// This is an absolute set, not a decrement. A negative count is rejected
    /// before the item is looked up, and leaves the bin untouched.
    pub fn adjust_item_count(&mut self, item_id: i32, new_count: i32) -> Result<(), InventoryError> {
        // Handlers check this too, ahead of the bin lookup; this guards other callers.
        if new_count < 0 {
            return Err(InventoryError::InvalidQuantity(new_count));
        }

        let item = self.get_item_mut(item_id)?;
        item.quantity = new_count;
        Ok(())
    }

    pub fn add_item(&mut self, item: Item) -> Result<(), InventoryError> {
        if self.items.iter().any(|i| i.id == item.id) {
            return Err(InventoryError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes the whole item record (not a single unit) from the bin.
    pub fn remove_item(&mut self, item_id: i32) -> Result<Item, InventoryError> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or(InventoryError::ItemNotFound(item_id))?;
        Ok(self.items.remove(pos))
    }

    /// Checks the per-bin invariants: unique item ids, non-negative quantities.
    pub fn check_invariants(&self) -> Result<(), InventoryError> {
        for (idx, item) in self.items.iter().enumerate() {
            if item.quantity < 0 {
                return Err(InventoryError::InvalidQuantity(item.quantity));
            }
            if self.items[..idx].iter().any(|i| i.id == item.id) {
                return Err(InventoryError::DuplicateItem(item.id));
            }
        }
        Ok(())
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Bin as submitted by a client (`POST /api/bins`) or read from a snapshot file.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBin {
    pub id: Option<i32>,
    pub description: Option<String>,
    /// Required, but may be empty.
    pub items: Option<Vec<NewItem>>,
}

impl NewBin {
    pub fn into_bin(self) -> Result<Bin, InventoryError> {
        let id = match self.id {
            Some(id) if id > 0 => id,
            _ => return Err(InventoryError::Validation("bin id must be a positive integer".into())),
        };
        let description = match self.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => {
                return Err(InventoryError::Validation(format!(
                    "bin {} description must not be empty",
                    id
                )))
            }
        };
        let payload_items = self.items.ok_or_else(|| {
            InventoryError::Validation(format!("bin {} items list is required", id))
        })?;

        let mut bin = Bin::new(id, description, Vec::with_capacity(payload_items.len()));
        for new_item in payload_items {
            let item = new_item.into_item()?;
            bin.add_item(item).map_err(|e| match e {
                InventoryError::DuplicateItem(item_id) => InventoryError::Validation(format!(
                    "bin {} lists item {} more than once",
                    id, item_id
                )),
                other => other,
            })?;
        }

        Ok(bin)
    }
}
