//! TOML loading for the tip catalog.
//!
//! Provides two loading methods:
//! - `default_catalog()` - Loads the catalog compiled into the binary
//! - `load_catalog(path)` - Loads a custom catalog from a file path

use std::path::Path;

use anyhow::{bail, Result};
use rand::Rng;

use super::types::{Tip, TipCatalog};

/// Default catalog embedded in the binary at compile time.
/// Loaded from `src-tauri/config/tips.toml`.
const DEFAULT_CATALOG: &str = include_str!("../../config/tips.toml");

/// Parse and sanity-check a catalog.
pub fn parse_catalog(content: &str) -> Result<TipCatalog> {
    let catalog: TipCatalog = toml::from_str(content)?;

    let mut seen = std::collections::HashSet::new();
    for tip in &catalog.tips {
        if !seen.insert(tip.id) {
            bail!("duplicate tip id {}", tip.id);
        }
    }

    Ok(catalog)
}

/// Load a catalog from a TOML file at the given path.
pub fn load_catalog(path: &Path) -> Result<TipCatalog> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Get the catalog embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_catalog() -> TipCatalog {
    parse_catalog(DEFAULT_CATALOG).expect("embedded tips.toml must be a valid catalog")
}

impl TipCatalog {
    pub fn get(&self, id: u32) -> Option<&Tip> {
        self.tips.iter().find(|t| t.id == id)
    }
}

/// Pick the index of the next daily tip, never repeating `current` when
/// there is more than one tip to choose from.
pub fn next_daily_index<R: Rng + ?Sized>(rng: &mut R, len: usize, current: Option<usize>) -> Option<usize> {
    match (len, current) {
        (0, _) => None,
        (1, _) => Some(0),
        (_, Some(cur)) if cur < len => {
            // Draw from the other len - 1 slots and skip over the current one.
            let pick = rng.random_range(0..len - 1);
            Some(if pick >= cur { pick + 1 } else { pick })
        }
        _ => Some(rng.random_range(0..len)),
    }
}
