//! Marketplace listings: published, investable snapshots of a site.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::score::InvestorScore;
use super::site::{Site, SiteId, SiteType};

/// Unique identifier for a marketplace listing.
///
/// Wraps a UUID v4. Allocated on first publish of a site and preserved
/// across subsequent re-publishes of the same `site_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ListingId(uuid::Uuid);

impl ListingId {
    /// Creates a new random `ListingId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `ListingId` from an existing [`uuid::Uuid`].
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

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published marketplace listing.
///
/// Site descriptors are denormalized copies captured at publish time;
/// the listing never holds a live reference back to the originating
/// [`Site`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Listing {
    /// Listing identifier, stable across re-publishes.
    pub id: ListingId,
    /// Site this listing wraps. Unique among active listings.
    pub site_id: SiteId,
    /// Site name at publish time.
    pub site_name: String,
    /// Site kind at publish time.
    pub site_type: SiteType,
    /// Parcel area in hectares at publish time.
    pub area_hectares: Option<f64>,
    /// Crop grown, for field sites.
    pub crop_type: Option<String>,
    /// Forest classification, for forest sites.
    pub forest_type: Option<String>,
    /// Embedded attractiveness score computed at publish time.
    pub investor_score: InvestorScore,
    /// CO₂ credits offered for sale, in tons.
    pub co2_credits_available: Option<f64>,
    /// Asking price per ton of CO₂ credits, in dirhams.
    pub co2_price_per_ton: Option<f64>,
    /// Whether the listing is visible to investors.
    pub is_active: bool,
    /// Timestamp of the most recent publish.
    pub published_at: DateTime<Utc>,
}

impl Listing {
    /// Builds a listing from a site and its freshly computed score.
    ///
    /// Allocates a new [`ListingId`]; the store replaces it with the
    /// existing one when the site is already listed.
    #[must_use]
    pub fn from_site(
        site: &Site,
        score: InvestorScore,
        co2_credits_available: Option<f64>,
        co2_price_per_ton: Option<f64>,
    ) -> Self {
        Self {
            id: ListingId::new(),
            site_id: site.id,
            site_name: site.name.clone(),
            site_type: site.site_type,
            area_hectares: site.area_hectares,
            crop_type: site.crop_type.clone(),
            forest_type: site.forest_type.clone(),
            investor_score: score,
            co2_credits_available,
            co2_price_per_ton,
            is_active: true,
            published_at: Utc::now(),
        }
    }
}

/// Result of a publish: the stored listing plus whether it was inserted
/// or overwrote an existing listing for the same site.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublishOutcome {
    /// The listing as persisted.
    pub listing: Listing,
    /// `true` for a fresh insert, `false` for an in-place update.
    pub created: bool,
}
