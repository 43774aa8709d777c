//! Marketplace store: persisted listing and submission collections.

pub mod marketplace_store;

pub use marketplace_store::{LISTINGS_SLOT, MarketplaceStore, SUBMISSIONS_SLOT};
