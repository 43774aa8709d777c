//! Site telemetry input types.
//!
//! A [`Site`] is a monitored field or forest parcel supplied by the
//! external site provider. The marketplace reads site attributes when
//! computing scores and publishing listings; it never writes back.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a site, allocated by the external site provider.
pub type SiteId = i64;

/// Kind of monitored parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SiteType {
    /// Cultivated agricultural field.
    Field,
    /// Forest parcel.
    Forest,
}

/// A monitored parcel with its latest telemetry attributes.
///
/// Every field except `id`, `name`, and `site_type` is optional; the
/// scoring engine has a defined fallback for each absent value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Site {
    /// Provider-allocated site identifier.
    pub id: SiteId,
    /// Human-readable site name.
    pub name: String,
    /// Whether this is a field or a forest.
    pub site_type: SiteType,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parcel area in hectares.
    #[serde(default)]
    pub area_hectares: Option<f64>,
    /// Crop grown on a field site.
    #[serde(default)]
    pub crop_type: Option<String>,
    /// Forest classification for forest sites.
    #[serde(default)]
    pub forest_type: Option<String>,
    /// Most recent NDVI sample in `[0, 1]`.
    #[serde(default)]
    pub latest_ndvi: Option<f64>,
    /// Aggregate health score in `[0, 100]`.
    #[serde(default)]
    pub health_score: Option<f64>,
    /// Fire risk classification for forest sites. Free-form string,
    /// matched case-insensitively; `"MODERATE"` and `"MEDIUM"` are
    /// synonyms for the middle tier.
    #[serde(default)]
    pub fire_risk_level: Option<String>,
}
