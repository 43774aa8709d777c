//! Service layer: orchestration of marketplace operations.

pub mod marketplace_service;

pub use marketplace_service::MarketplaceService;
