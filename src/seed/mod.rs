use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::models::{Bin, Item, NewBin};
use crate::store::SnapshotSource;

/// The fixture the service starts from when no snapshot file is configured.
pub fn default_bins() -> Vec<Bin> {
    vec![
        Bin::new(
            1,
            "Warehouse A",
            vec![Item::new(1, "Screwdriver", 10), Item::new(2, "Hammer", 5)],
        ),
        Bin::new(
            2,
            "Warehouse B",
            vec![Item::new(3, "Drill", 3), Item::new(4, "Saw", 7)],
        ),
    ]
}

/// A fixed snapshot of the bin feed. Every fetch hands out a fresh copy.
#[derive(Debug, Clone)]
pub struct SeedSnapshot {
    bins: Vec<Bin>,
}

impl SeedSnapshot {
    pub fn builtin() -> Self {
        Self {
            bins: default_bins(),
        }
    }

    /// Parses a JSON array of bins, applying the same field checks as
    /// `POST /api/bins`.
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let payload: Vec<NewBin> =
            serde_json::from_str(raw).context("snapshot must be a JSON array of bins")?;

        let bins = payload
            .into_iter()
            .enumerate()
            .map(|(idx, new_bin)| {
                new_bin
                    .into_bin()
                    .with_context(|| format!("invalid bin at snapshot index {}", idx))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { bins })
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot file {}", path.display()))?;
        let snapshot = Self::from_json_str(&raw)
            .with_context(|| format!("failed to load snapshot file {}", path.display()))?;

        info!(path = %path.display(), bins = snapshot.bins.len(), "Loaded bin snapshot");
        Ok(snapshot)
    }
}

impl SnapshotSource for SeedSnapshot {
    fn fetch_bins(&self) -> Vec<Bin> {
        self.bins.clone()
    }
}
