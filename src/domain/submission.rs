//! Investment interest submissions from investors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::listing::ListingId;
use super::site::SiteId;

/// Unique identifier for an investment submission.
///
/// Wraps a UUID v4. Allocated once at intake and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SubmissionId(uuid::Uuid);

impl SubmissionId {
    /// Creates a new random `SubmissionId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `SubmissionId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the investor is expressing interest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentType {
    /// Purchase of CO₂ credits only.
    Co2Credits,
    /// Direct investment in the site.
    SiteInvestment,
    /// Both CO₂ credits and site investment.
    Both,
}

/// Intake payload for a new submission.
///
/// Field presence (`investor_name`, `investor_email`) is enforced at the
/// form-entry layer; the store accepts any well-formed draft.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmissionDraft {
    /// Listing the interest is submitted against.
    pub listing_id: ListingId,
    /// Site behind the listing.
    pub site_id: SiteId,
    /// Denormalized site name for owner-facing views.
    pub site_name: String,
    /// Investor's name.
    pub investor_name: String,
    /// Investor's contact email.
    pub investor_email: String,
    /// Optional phone number.
    #[serde(default)]
    pub investor_phone: Option<String>,
    /// What the investor is interested in.
    pub investment_type: InvestmentType,
    /// Proposed amount in dirhams.
    #[serde(default)]
    pub proposed_amount_dh: Option<f64>,
    /// Free-text message to the owner.
    #[serde(default)]
    pub message: Option<String>,
}

/// An investor's expression of interest against a listing.
///
/// Append-only: contact and content fields are immutable after intake.
/// The `is_read`/`is_contacted` flags are monotonic — once set they are
/// never reset; marking contacted implies marking read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    /// Submission identifier.
    pub id: SubmissionId,
    /// Listing the interest was submitted against.
    pub listing_id: ListingId,
    /// Site behind the listing.
    pub site_id: SiteId,
    /// Denormalized site name.
    pub site_name: String,
    /// Investor's name.
    pub investor_name: String,
    /// Investor's contact email.
    pub investor_email: String,
    /// Optional phone number.
    pub investor_phone: Option<String>,
    /// What the investor is interested in.
    pub investment_type: InvestmentType,
    /// Proposed amount in dirhams.
    pub proposed_amount_dh: Option<f64>,
    /// Free-text message to the owner.
    pub message: Option<String>,
    /// Whether the owner has seen this submission.
    pub is_read: bool,
    /// Whether the owner has contacted the investor.
    pub is_contacted: bool,
    /// Intake timestamp.
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Creates a submission from an intake draft with a fresh id, both
    /// flags cleared, and `submitted_at` set to now.
    #[must_use]
    pub fn from_draft(draft: SubmissionDraft) -> Self {
        Self {
            id: SubmissionId::new(),
            listing_id: draft.listing_id,
            site_id: draft.site_id,
            site_name: draft.site_name,
            investor_name: draft.investor_name,
            investor_email: draft.investor_email,
            investor_phone: draft.investor_phone,
            investment_type: draft.investment_type,
            proposed_amount_dh: draft.proposed_amount_dh,
            message: draft.message,
            is_read: false,
            is_contacted: false,
            submitted_at: Utc::now(),
        }
    }
}
