//! # atlas-marketplace
//!
//! Investor marketplace service for the Atlas satellite-monitoring
//! platform. Converts raw site telemetry (NDVI history, area, risk
//! indicators) into a bounded investor attractiveness score, and
//! manages the listing/submission lifecycle built on top of it.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── MarketplaceService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── Scoring Engine (domain/score)
//!     ├── MarketplaceStore (store/)
//!     │
//!     └── SlotStore (persistence/: memory or PostgreSQL)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod store;
pub mod ws;
