//! Persistence layer: named key-value slots behind the [`SlotStore`]
//! trait.
//!
//! The marketplace keeps each collection serialized in one named slot.
//! Injecting the store as a trait object keeps the listing and scoring
//! logic testable against [`memory::MemorySlotStore`] and swappable for
//! [`postgres::PostgresSlotStore`] without touching either.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::MarketplaceError;

/// Durable storage for named slots, each holding one serialized JSON
/// document.
///
/// A missing slot is equivalent to an empty collection; the first write
/// seeds it. Implementations must make each `write_slot` all-or-nothing
/// so a failed operation never commits a partial collection.
#[async_trait]
pub trait SlotStore: Send + Sync + std::fmt::Debug {
    /// Reads the payload of a slot, or `None` if the slot has never been
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the backing store is
    /// unavailable.
    async fn read_slot(&self, slot: &str) -> Result<Option<serde_json::Value>, MarketplaceError>;

    /// Replaces the payload of a slot, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the backing store is
    /// unavailable. No partial payload is committed on failure.
    async fn write_slot(
        &self,
        slot: &str,
        payload: serde_json::Value,
    ) -> Result<(), MarketplaceError>;
}
