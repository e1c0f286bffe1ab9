//! The entry store
//!
//! Maps canonical names to entries. [`EntryStore::commit`] is the only way
//! in; a name that is already taken is rejected, never overwritten.

use crate::entry::Entry;
use crate::error::{CookbookError, Result};
use crate::name::CanonicalName;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store shared between request handlers.
///
/// Writers hold the lock across validation and commit so the duplicate check
/// and the insert happen as one step.
pub type SharedStore = Arc<RwLock<EntryStore>>;

/// In-memory cookbook keyed by canonical name
#[derive(Debug, Default, Clone)]
pub struct EntryStore {
    entries: HashMap<CanonicalName, Entry>,
}

impl EntryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Wrap this store for use behind the HTTP layer
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Insert an entry under its own canonical name.
    pub fn commit(&mut self, entry: Entry) -> Result<()> {
        let name = entry.name().clone();
        if self.entries.contains_key(&name) {
            return Err(CookbookError::DuplicateName(name));
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted by name
    pub fn entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries
    }
}
