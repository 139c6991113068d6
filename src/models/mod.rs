pub mod bin;
pub mod item;

pub use bin::{Bin, NewBin};
pub use item::{Item, NewItem};

use thiserror::Error;

/// Domain failures raised by bin and item operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Bin {0} not found")]
    BinNotFound(i32),

    #[error("Item {0} not found")]
    ItemNotFound(i32),

    #[error("New item count must be non-negative (got {0})")]
    InvalidQuantity(i32),

    #[error("Bin {0} already exists")]
    DuplicateBin(i32),

    #[error("Item {0} already exists in bin")]
    DuplicateItem(i32),

    #[error("Invalid input: {0}")]
    Validation(String),
}
