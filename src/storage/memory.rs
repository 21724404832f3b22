//! In-memory storage backend.
//!
//! Holds slots in a process-local map. Useful for embedding the controller
//! where durability is handled elsewhere, and as the default test double.

use crate::domain::error::Result;
use crate::storage::backend::SlotStorage;
use std::collections::HashMap;

/// Process-local [`SlotStorage`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with `slot` already holding `payload`.
    #[must_use]
    pub fn with_slot(slot: impl Into<String>, payload: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.into(), payload.into());
        Self { slots }
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, payload: &str) -> Result<()> {
        self.slots.insert(slot.to_string(), payload.to_string());
        Ok(())
    }
}
