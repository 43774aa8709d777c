//! PostgreSQL implementation of the slot store.
//!
//! Each slot is one row in the `storage_slots` table with a JSONB
//! payload; writes are single-statement upserts, so a slot is replaced
//! atomically or not at all.

use async_trait::async_trait;
use sqlx::PgPool;

use super::SlotStore;
use crate::error::MarketplaceError;

/// PostgreSQL-backed slot store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresSlotStore {
    pool: PgPool,
}

impl PostgresSlotStore {
    /// Creates a new slot store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `storage_slots` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError::Storage`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), MarketplaceError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS storage_slots (\
                 slot_key TEXT PRIMARY KEY, \
                 payload JSONB NOT NULL, \
                 updated_at TIMESTAMPTZ NOT NULL DEFAULT now()\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SlotStore for PostgresSlotStore {
    async fn read_slot(&self, slot: &str) -> Result<Option<serde_json::Value>, MarketplaceError> {
        let payload = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT payload FROM storage_slots WHERE slot_key = $1",
        )
        .bind(slot)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

        Ok(payload)
    }

    async fn write_slot(
        &self,
        slot: &str,
        payload: serde_json::Value,
    ) -> Result<(), MarketplaceError> {
        sqlx::query(
            "INSERT INTO storage_slots (slot_key, payload) VALUES ($1, $2) \
             ON CONFLICT (slot_key) \
             DO UPDATE SET payload = EXCLUDED.payload, updated_at = now()",
        )
        .bind(slot)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| MarketplaceError::Storage(e.to_string()))?;

        Ok(())
    }
}
