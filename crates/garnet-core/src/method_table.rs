//! Per-module method table
//!
//! Rows are `Arc<MethodEntry>` values built completely before they are
//! inserted. The write lock is held only for the map insert, so a concurrent
//! `lookup` observes either the previous row or the new one.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::method::MethodEntry;

/// Name-indexed method table
#[derive(Debug, Default)]
pub struct MethodTable {
    entries: RwLock<FxHashMap<String, Arc<MethodEntry>>>,
}

impl MethodTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an entry under `name`, replacing any previous entry.
    ///
    /// Returns the replaced entry.
    pub fn install(&self, name: &str, entry: Arc<MethodEntry>) -> Option<Arc<MethodEntry>> {
        self.entries.write().insert(name.to_string(), entry)
    }

    /// Install several entries under a single write lock
    pub fn install_batch<I>(&self, rows: I)
    where
        I: IntoIterator<Item = (String, Arc<MethodEntry>)>,
    {
        let mut entries = self.entries.write();
        for (name, entry) in rows {
            entries.insert(name, entry);
        }
    }

    /// Look up an entry by name
    pub fn lookup(&self, name: &str) -> Option<Arc<MethodEntry>> {
        self.entries.read().get(name).cloned()
    }

    /// Check if a method is defined in this table
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Remove an entry
    pub fn remove(&self, name: &str) -> Option<Arc<MethodEntry>> {
        self.entries.write().remove(name)
    }

    /// All method names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
