use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::store::Durability;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Rebuild the bins from the snapshot on every access, discarding writes.
    pub seed_reset_per_read: bool,
    /// JSON file holding the initial bins; the built-in fixture when unset.
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            seed_reset_per_read: match var("SEED_RESET_PER_READ") {
                Some(raw) => parse_flag(&raw).context("SEED_RESET_PER_READ must be a boolean")?,
                None => false,
            },
            snapshot_path: var("SNAPSHOT_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn durability(&self) -> Durability {
        if self.seed_reset_per_read {
            Durability::SeedResetPerRead
        } else {
            Durability::Durable
        }
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised flag value '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 3000);
        assert!(!cfg.seed_reset_per_read);
        assert_eq!(cfg.durability(), Durability::Durable);
        assert!(cfg.snapshot_path.is_none());
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8081"),
            ("SEED_RESET_PER_READ", "TRUE"),
            ("SNAPSHOT_PATH", "/etc/bins.json"),
        ])
        .unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.durability(), Durability::SeedResetPerRead);
        assert_eq!(cfg.snapshot_path, Some(PathBuf::from("/etc/bins.json")));
    }

    #[test]
    fn bad_port_fails() {
        assert!(config(&[("PORT", "http")]).is_err());
        assert!(config(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn flag_values() {
        for raw in ["1", "true", "Yes", " on "] {
            assert!(parse_flag(raw).unwrap(), "{}", raw);
        }
        for raw in ["0", "false", "NO", "off"] {
            assert!(!parse_flag(raw).unwrap(), "{}", raw);
        }
        assert!(config(&[("SEED_RESET_PER_READ", "maybe")]).is_err());
    }
}
