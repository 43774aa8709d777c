//! Listing-related DTOs for publish, score, and list operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{Listing, Site};

/// Request body for `POST /listings`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishListingRequest {
    /// Site to publish, as supplied by the site provider.
    pub site: Site,
    /// CO₂ credits offered for sale, in tons.
    #[serde(default)]
    pub co2_credits_available: Option<f64>,
    /// Asking price per ton of CO₂ credits, in dirhams.
    #[serde(default)]
    pub co2_price_per_ton: Option<f64>,
    /// Optional NDVI history used for the yield stability factor.
    #[serde(default)]
    pub ndvi_history: Option<Vec<f64>>,
}

/// Response body for `POST /listings`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublishListingResponse {
    /// The listing as persisted.
    pub listing: Listing,
    /// `true` for a fresh insert, `false` for an in-place update.
    pub created: bool,
}

/// Paginated list response for `GET /listings`.
#[derive(Debug, Serialize)]
pub struct ListingListResponse {
    /// Active listings in persisted order.
    pub data: Vec<Listing>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Request body for `POST /scores`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScoreRequest {
    /// Site to score.
    pub site: Site,
    /// Optional NDVI history used for the yield stability factor.
    #[serde(default)]
    pub ndvi_history: Option<Vec<f64>>,
}
