use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{Bin, InventoryError};

// ── Snapshot source ──────────────────────────────────────────────────────────

/// Supplier of the current bin snapshot (the upstream rack feed, a fixture,
/// a file). The store only ever asks it for a full copy.
pub trait SnapshotSource: Send + Sync {
    fn fetch_bins(&self) -> Vec<Bin>;
}

// ── BinCollection ────────────────────────────────────────────────────────────

/// All bins, keyed by id and kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct BinCollection {
    bins: IndexMap<i32, Bin>,
}

impl BinCollection {
    /// Builds a collection, rejecting duplicate bin ids and bins that break
    /// their own item invariants.
    pub fn from_bins(bins: impl IntoIterator<Item = Bin>) -> Result<Self, InventoryError> {
        let mut collection = Self::default();
        for bin in bins {
            bin.check_invariants()?;
            collection.insert_bin(bin)?;
        }
        Ok(collection)
    }

    pub fn list_bins(&self) -> impl Iterator<Item = &Bin> {
        self.bins.values()
    }

    pub fn get_by_id(&self, bin_id: i32) -> Option<&Bin> {
        self.bins.get(&bin_id)
    }

    pub fn get_by_id_mut(&mut self, bin_id: i32) -> Option<&mut Bin> {
        self.bins.get_mut(&bin_id)
    }

    /// Like [`get_by_id`](Self::get_by_id), but absence is a `BinNotFound` error.
    pub fn bin(&self, bin_id: i32) -> Result<&Bin, InventoryError> {
        self.get_by_id(bin_id).ok_or(InventoryError::BinNotFound(bin_id))
    }

    pub fn bin_mut(&mut self, bin_id: i32) -> Result<&mut Bin, InventoryError> {
        self.get_by_id_mut(bin_id).ok_or(InventoryError::BinNotFound(bin_id))
    }

    pub fn contains(&self, bin_id: i32) -> bool {
        self.bins.contains_key(&bin_id)
    }

    pub fn insert_bin(&mut self, bin: Bin) -> Result<(), InventoryError> {
        if self.contains(bin.id) {
            return Err(InventoryError::DuplicateBin(bin.id));
        }
        self.bins.insert(bin.id, bin);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

// ── BinStore ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// Snapshot loaded once; mutations persist for the process lifetime.
    Durable,
    /// Every access starts from a fresh snapshot and mutations are discarded.
    SeedResetPerRead,
}

/// Shared handle to the bin graph. In durable mode reads run under the shared lock, writes
/// hold the exclusive lock for the whole check-then-mutate closure.
pub struct BinStore {
    source: Arc<dyn SnapshotSource>,
    backing: Backing,
}

enum Backing {
    Durable(RwLock<BinCollection>),
    /// No resident graph; each access builds its own from `source`.
    SeedResetPerRead,
}

impl BinStore {
    /// Fails if the snapshot breaks the collection invariants, in either mode.
    pub fn new(source: Arc<dyn SnapshotSource>, durability: Durability) -> Result<Self, InventoryError> {
        let initial = BinCollection::from_bins(source.fetch_bins())?;
        let backing = match durability {
            Durability::Durable => Backing::Durable(RwLock::new(initial)),
            Durability::SeedResetPerRead => Backing::SeedResetPerRead,
        };
        Ok(Self { source, backing })
    }

    pub fn durability(&self) -> Durability {
        match self.backing {
            Backing::Durable(_) => Durability::Durable,
            Backing::SeedResetPerRead => Durability::SeedResetPerRead,
        }
    }

    pub async fn read<F, R>(&self, f: F) -> Result<R, InventoryError>
    where
        F: FnOnce(&BinCollection) -> Result<R, InventoryError>,
    {
        match &self.backing {
            Backing::Durable(state) => f(&*state.read().await),
            Backing::SeedResetPerRead => f(&self.fresh()?),
        }
    }

    pub async fn write<F, R>(&self, f: F) -> Result<R, InventoryError>
    where
        F: FnOnce(&mut BinCollection) -> Result<R, InventoryError>,
    {
        match &self.backing {
            Backing::Durable(state) => f(&mut *state.write().await),
            Backing::SeedResetPerRead => {
                let mut scratch = self.fresh()?;
                let result = f(&mut scratch);
                debug!("seed-reset mode: discarding mutated collection");
                result
            }
        }
    }

    fn fresh(&self) -> Result<BinCollection, InventoryError> {
        BinCollection::from_bins(self.source.fetch_bins())
    }
}
