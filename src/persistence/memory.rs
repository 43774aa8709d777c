//! In-memory implementation of the slot store.
//!
//! Used by unit tests and by deployments that opt out of durable
//! persistence. Contents live for the lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SlotStore;
use crate::error::MarketplaceError;

/// Process-local slot store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemorySlotStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn read_slot(&self, slot: &str) -> Result<Option<serde_json::Value>, MarketplaceError> {
        let slots = self.slots.read().await;
        Ok(slots.get(slot).cloned())
    }

    async fn write_slot(
        &self,
        slot: &str,
        payload: serde_json::Value,
    ) -> Result<(), MarketplaceError> {
        let mut slots = self.slots.write().await;
        slots.insert(slot.to_string(), payload);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_slot_reads_none() {
        let store = MemorySlotStore::new();
        let result = store.read_slot("never_written").await;
        let Ok(payload) = result else {
            panic!("read failed");
        };
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = MemorySlotStore::new();
        let payload = serde_json::json!([{"id": 1}]);

        let write = store.write_slot("listings", payload.clone()).await;
        assert!(write.is_ok());

        let read = store.read_slot("listings").await;
        let Ok(Some(stored)) = read else {
            panic!("expected stored payload");
        };
        assert_eq!(stored, payload);
    }

    #[tokio::test]
    async fn write_replaces_previous_payload() {
        let store = MemorySlotStore::new();
        let _ = store.write_slot("slot", serde_json::json!([1])).await;
        let _ = store.write_slot("slot", serde_json::json!([1, 2])).await;

        let read = store.read_slot("slot").await;
        let Ok(Some(stored)) = read else {
            panic!("expected stored payload");
        };
        assert_eq!(stored, serde_json::json!([1, 2]));
    }

    #[tokio::test]
    async fn slots_are_independent() {
        let store = MemorySlotStore::new();
        let _ = store.write_slot("a", serde_json::json!(1)).await;

        let read = store.read_slot("b").await;
        let Ok(payload) = read else {
            panic!("read failed");
        };
        assert!(payload.is_none());
    }
}
