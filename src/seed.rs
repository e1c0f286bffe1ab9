//! Seed files
//!
//! A seed file is a JSON array of entry objects, each shaped like a
//! `POST /entry` body. Entries are committed in file order, so a recipe may
//! appear before the ingredients it needs.

use crate::entry::EntryRequest;
use crate::store::EntryStore;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read a seed file into a fresh store.
pub fn load_file(path: &Path) -> Result<EntryStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    let mut store = EntryStore::new();
    load_str(&content, &mut store)
        .with_context(|| format!("Failed to load seed file: {}", path.display()))?;
    Ok(store)
}

/// Commit every entry in `content` into `store`. Returns the number added.
///
/// Stops at the first rejected entry; entries before it stay committed.
pub fn load_str(content: &str, store: &mut EntryStore) -> Result<usize> {
    let value: Value = serde_json::from_str(content).context("Seed is not valid JSON")?;
    let Value::Array(items) = value else {
        bail!("Seed must be a JSON array of entries");
    };

    for (i, body) in items.iter().enumerate() {
        let entry = EntryRequest::from_json(body)
            .and_then(|req| req.build(store))
            .with_context(|| format!("Seed entry {} rejected", i))?;
        debug!(name = %entry.name(), kind = entry.kind(), "seeded entry");
        store.commit(entry)?;
    }

    Ok(items.len())
}
