//! Domain events reflecting marketplace state mutations.
//!
//! Every state change emits a [`MarketEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers
//! so owner dashboards can refresh listings and the unread badge live.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::listing::ListingId;
use super::site::SiteId;
use super::submission::{InvestmentType, SubmissionId};

/// Domain event emitted after every marketplace state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// Emitted when a site is published (or re-published) to the
    /// marketplace.
    ListingPublished {
        /// Listing identifier.
        listing_id: ListingId,
        /// Site behind the listing.
        site_id: SiteId,
        /// Composite score embedded in the listing.
        total_score: u8,
        /// Whether this publish inserted a new listing.
        created: bool,
        /// Publish timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a site is removed from the marketplace.
    ListingUnpublished {
        /// Site whose listing was removed.
        site_id: SiteId,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an investor submits interest against a listing.
    InterestSubmitted {
        /// Submission identifier.
        submission_id: SubmissionId,
        /// Listing the interest targets.
        listing_id: ListingId,
        /// Site behind the listing.
        site_id: SiteId,
        /// What the investor is interested in.
        investment_type: InvestmentType,
        /// Intake timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the owner marks a submission as read.
    SubmissionRead {
        /// Submission identifier.
        submission_id: SubmissionId,
        /// Site behind the submission.
        site_id: SiteId,
        /// Transition timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the owner marks a submission as contacted.
    SubmissionContacted {
        /// Submission identifier.
        submission_id: SubmissionId,
        /// Site behind the submission.
        site_id: SiteId,
        /// Transition timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl MarketEvent {
    /// Returns the site ID associated with this event.
    #[must_use]
    pub const fn site_id(&self) -> SiteId {
        match self {
            Self::ListingPublished { site_id, .. }
            | Self::ListingUnpublished { site_id, .. }
            | Self::InterestSubmitted { site_id, .. }
            | Self::SubmissionRead { site_id, .. }
            | Self::SubmissionContacted { site_id, .. } => *site_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::ListingPublished { .. } => "listing_published",
            Self::ListingUnpublished { .. } => "listing_unpublished",
            Self::InterestSubmitted { .. } => "interest_submitted",
            Self::SubmissionRead { .. } => "submission_read",
            Self::SubmissionContacted { .. } => "submission_contacted",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn listing_published_event_type() {
        let event = MarketEvent::ListingPublished {
            listing_id: ListingId::new(),
            site_id: 7,
            total_score: 74,
            created: true,
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type_str(), "listing_published");
        assert_eq!(event.site_id(), 7);
    }

    #[test]
    fn interest_submitted_serializes() {
        let event = MarketEvent::InterestSubmitted {
            submission_id: SubmissionId::new(),
            listing_id: ListingId::new(),
            site_id: 3,
            investment_type: InvestmentType::Co2Credits,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event);
        assert!(json.is_ok());
        let json_str = json.unwrap_or_default();
        assert!(json_str.contains("interest_submitted"));
        assert!(json_str.contains("CO2_CREDITS"));
    }

    #[test]
    fn site_id_accessor() {
        let event = MarketEvent::ListingUnpublished {
            site_id: 11,
            timestamp: Utc::now(),
        };
        assert_eq!(event.site_id(), 11);
    }
}
