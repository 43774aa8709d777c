//! Submission-related DTOs for intake, listing, and the unread badge.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{InvestmentType, ListingId, SiteId, Submission, SubmissionDraft};

/// Request body for `POST /submissions`.
///
/// Presence of `investor_name` and `investor_email` is the caller's
/// (form layer's) responsibility; the store does not re-validate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitInterestRequest {
    /// Listing the interest is submitted against.
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

impl From<SubmitInterestRequest> for SubmissionDraft {
    fn from(req: SubmitInterestRequest) -> Self {
        Self {
            listing_id: req.listing_id,
            site_id: req.site_id,
            site_name: req.site_name,
            investor_name: req.investor_name,
            investor_email: req.investor_email,
            investor_phone: req.investor_phone,
            investment_type: req.investment_type,
            proposed_amount_dh: req.proposed_amount_dh,
            message: req.message,
        }
    }
}

/// List response for `GET /submissions`.
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    /// Submissions in the ordering documented for the query.
    pub data: Vec<Submission>,
}

/// Response body for `GET /submissions/unread-count`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    /// Number of submissions not yet read, across all sites.
    pub unread: usize,
}
