//! Domain layer: core marketplace types, scoring engine, and event system.
//!
//! This module contains the marketplace domain model including site
//! telemetry inputs, the investor attractiveness scoring engine, listing
//! and submission records, and the event bus for broadcasting state
//! changes to WebSocket subscribers.

pub mod event_bus;
pub mod listing;
pub mod market_event;
pub mod score;
pub mod site;
pub mod submission;

pub use event_bus::EventBus;
pub use listing::{Listing, ListingId, PublishOutcome};
pub use market_event::MarketEvent;
pub use score::{InvestorScore, InvestorScoreBreakdown, compute_score};
pub use site::{Site, SiteId, SiteType};
pub use submission::{InvestmentType, Submission, SubmissionDraft, SubmissionId};
