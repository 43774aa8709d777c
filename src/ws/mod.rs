//! WebSocket layer: live marketplace event feed.
//!
//! Clients subscribe to [`crate::domain::MarketEvent`]s for specific
//! sites (or all sites) to drive live dashboards and the unread badge.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
