//! The memory store — the catalog, the revealed prefix, and the saved list.
//!
//! Records are revealed strictly in catalog order, so "loaded" is always a
//! prefix of the catalog. Saving is tracked both on the record (`saved`
//! flag) and in a side list that preserves save order for the vault.

use crate::error::SaveError;
use crate::types::{MemoryId, MemoryRecord};

/// Owns every record for the session and tracks reveal/save progress.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: Vec<MemoryRecord>,
    revealed: usize,
    saved: Vec<MemoryId>,
}

impl MemoryStore {
    /// Build a store over a catalog. Nothing is revealed yet.
    #[must_use]
    pub fn new(catalog: Vec<MemoryRecord>) -> Self {
        Self {
            records: catalog,
            revealed: 0,
            saved: Vec::new(),
        }
    }

    /// Reveal up to `n` further records in catalog order.
    ///
    /// Returns the newly revealed slice — empty once the catalog is
    /// exhausted, which is what makes repeated pagination triggers
    /// idempotent.
    pub fn reveal(&mut self, n: usize) -> &[MemoryRecord] {
        let start = self.revealed;
        self.revealed = (self.revealed + n).min(self.records.len());
        &self.records[start..self.revealed]
    }

    /// Mark a revealed record as saved. Irreversible.
    ///
    /// # Errors
    /// [`SaveError::NotFound`] if the id is unknown or not yet revealed,
    /// [`SaveError::AlreadySaved`] if the record was saved before.
    pub fn mark_saved(&mut self, id: MemoryId) -> Result<(), SaveError> {
        let idx = self.records[..self.revealed]
            .iter()
            .position(|r| r.id == id)
            .ok_or(SaveError::NotFound(id))?;
        if self.records[idx].saved {
            return Err(SaveError::AlreadySaved(id));
        }
        self.records[idx].saved = true;
        self.saved.push(id);
        Ok(())
    }

    /// The revealed records, in reveal (= catalog) order.
    #[must_use]
    pub fn loaded(&self) -> &[MemoryRecord] {
        &self.records[..self.revealed]
    }

    /// Mutable view of the revealed records, for corruption passes.
    pub fn loaded_mut(&mut self) -> &mut [MemoryRecord] {
        &mut self.records[..self.revealed]
    }

    /// Look up a revealed record by id.
    #[must_use]
    pub fn record(&self, id: MemoryId) -> Option<&MemoryRecord> {
        self.loaded().iter().find(|r| r.id == id)
    }

    /// Total catalog size.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// How many records have been revealed.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Whether every catalog record has been revealed.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.revealed == self.records.len()
    }

    /// Saved records in save order (the vault listing).
    #[must_use]
    pub fn saved_records(&self) -> Vec<&MemoryRecord> {
        self.saved
            .iter()
            .filter_map(|id| self.record(*id))
            .collect()
    }

    /// How many records were saved.
    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// How many catalog records were (or will be) lost.
    #[must_use]
    pub fn lost_count(&self) -> usize {
        self.records.len() - self.saved.len()
    }
}
