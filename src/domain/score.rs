//! Investor attractiveness scoring engine.
//!
//! [`compute_score`] is a pure, total function: every input field has a
//! defined fallback, there are no error paths and no side effects.
//! Recomputing a score for identical inputs changes only the timestamp.
//!
//! Factor caps sum to exactly 100:
//!
//! | Factor                 | Cap |
//! |------------------------|-----|
//! | Yield stability        | 30  |
//! | Crop diversification   | 20  |
//! | Farm surface area      | 15  |
//! | Climate resilience     | 25  |
//! | Historical performance | 10  |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::site::{Site, SiteId, SiteType};

/// Maximum points awarded for yield stability.
pub const YIELD_STABILITY_MAX: u8 = 30;
/// Maximum points awarded for crop diversification.
pub const CROP_DIVERSIFICATION_MAX: u8 = 20;
/// Maximum points awarded for farm surface area.
pub const FARM_SURFACE_AREA_MAX: u8 = 15;
/// Maximum points awarded for climate resilience.
pub const CLIMATE_RESILIENCE_MAX: u8 = 25;
/// Maximum points awarded for historical performance.
pub const HISTORICAL_PERFORMANCE_MAX: u8 = 10;

/// Ceiling of the investment potential estimate in dirhams.
pub const INVESTMENT_POTENTIAL_CEILING_DH: u32 = 200_000;
/// Lower bound of the estimated ROI range, in percent.
pub const ROI_MIN_PCT: u8 = 12;
/// Spread added on top of [`ROI_MIN_PCT`] for a perfect score, in percent.
pub const ROI_SPREAD_PCT: f64 = 13.0;

/// Minimum NDVI history length for the variance-based stability path.
const MIN_HISTORY_SAMPLES: usize = 3;

/// Per-factor breakdown of an [`InvestorScore`].
///
/// Each component is bounded by its documented cap; the caps sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvestorScoreBreakdown {
    /// Dispersion of the NDVI time series (cap 30).
    pub yield_stability: u8,
    /// Cropping diversity, or full marks for natural ecosystems (cap 20).
    pub crop_diversification: u8,
    /// Step function on parcel area (cap 15).
    pub farm_surface_area: u8,
    /// Fire risk tier or health proxy (cap 25).
    pub climate_resilience: u8,
    /// Health proxy (cap 10).
    pub historical_performance: u8,
}

impl InvestorScoreBreakdown {
    /// Sum of the five components.
    #[must_use]
    pub const fn total(&self) -> u8 {
        self.yield_stability
            + self.crop_diversification
            + self.farm_surface_area
            + self.climate_resilience
            + self.historical_performance
    }
}

/// Composite investor attractiveness score for a site.
///
/// A derived, immutable snapshot of the site's telemetry at
/// `calculated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvestorScore {
    /// Site the score was computed for.
    pub site_id: SiteId,
    /// Composite score in `[0, 100]`.
    pub total_score: u8,
    /// Per-factor breakdown.
    pub breakdown: InvestorScoreBreakdown,
    /// Estimated investment potential in dirhams, `[0, 200000]`.
    pub investment_potential_dh: u32,
    /// Lower bound of the estimated ROI range (always 12%).
    pub estimated_roi_min: u8,
    /// Upper bound of the estimated ROI range, `[12, 25]`%.
    pub estimated_roi_max: u8,
    /// Computation timestamp.
    pub calculated_at: DateTime<Utc>,
}

/// Computes the investor attractiveness score for a site.
///
/// `ndvi_history` is an optional temporal sequence of NDVI samples in
/// `[0, 1]` (conventionally twelve, one per month). Only its statistical
/// dispersion is used, so no ordering is enforced.
#[must_use]
pub fn compute_score(site: &Site, ndvi_history: Option<&[f64]>) -> InvestorScore {
    let breakdown = InvestorScoreBreakdown {
        yield_stability: yield_stability(site, ndvi_history),
        crop_diversification: crop_diversification(site),
        farm_surface_area: farm_surface_area(site),
        climate_resilience: climate_resilience(site),
        historical_performance: historical_performance(site),
    };

    let total_score = breakdown.total();
    let fraction = f64::from(total_score) / 100.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let investment_potential_dh =
        (fraction * f64::from(INVESTMENT_POTENTIAL_CEILING_DH)).round() as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let estimated_roi_max = (f64::from(ROI_MIN_PCT) + fraction * ROI_SPREAD_PCT).round() as u8;

    InvestorScore {
        site_id: site.id,
        total_score,
        breakdown,
        investment_potential_dh,
        estimated_roi_min: ROI_MIN_PCT,
        estimated_roi_max,
        calculated_at: Utc::now(),
    }
}

/// Yield stability from NDVI dispersion over time (cap 30).
///
/// With at least three samples, low biased variance maps to high
/// stability; the 10× multiplier keeps realistic NDVI variances (≲0.1)
/// inside a meaningful 0–30 range with a floor at zero. The
/// single-sample proxy path tops out at 25 rather than 30: full history
/// earns the higher ceiling.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn yield_stability(site: &Site, ndvi_history: Option<&[f64]>) -> u8 {
    if let Some(samples) = ndvi_history
        && samples.len() >= MIN_HISTORY_SAMPLES
    {
        #[allow(clippy::cast_precision_loss)]
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let stability = (1.0 - variance * 10.0).max(0.0);
        return (stability * f64::from(YIELD_STABILITY_MAX)).round() as u8;
    }
    match site.latest_ndvi {
        Some(ndvi) => (ndvi * 25.0).round() as u8,
        None => 0,
    }
}

/// Crop diversification (cap 20). Forests count as fully diversified
/// natural ecosystems; fields score on whether a crop is recorded, since
/// true multi-crop data is unavailable.
const fn crop_diversification(site: &Site) -> u8 {
    match site.site_type {
        SiteType::Field => {
            if site.crop_type.is_some() {
                15
            } else {
                10
            }
        }
        SiteType::Forest => CROP_DIVERSIFICATION_MAX,
    }
}

/// Farm surface area step function (cap 15). A missing or zero area
/// still lands in the lowest bucket; there is no zero score.
fn farm_surface_area(site: &Site) -> u8 {
    let area = site.area_hectares.unwrap_or(0.0);
    if area >= 100.0 {
        15
    } else if area >= 50.0 {
        12
    } else if area >= 20.0 {
        9
    } else if area >= 10.0 {
        6
    } else {
        3
    }
}

/// Climate resilience (cap 25). Forests score on fire risk tier; fields
/// on the health proxy.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn climate_resilience(site: &Site) -> u8 {
    match site.site_type {
        SiteType::Forest => {
            let risk = site
                .fire_risk_level
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_default();
            match risk.as_str() {
                "LOW" => CLIMATE_RESILIENCE_MAX,
                "MODERATE" | "MEDIUM" => 15,
                _ => 5,
            }
        }
        SiteType::Field => {
            (health_proxy(site) / 100.0 * f64::from(CLIMATE_RESILIENCE_MAX)).round() as u8
        }
    }
}

/// Historical performance from the health proxy (cap 10).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn historical_performance(site: &Site) -> u8 {
    (health_proxy(site) / 100.0 * f64::from(HISTORICAL_PERFORMANCE_MAX)).round() as u8
}

/// Health proxy in `[0, 100]`: `health_score` if present, else
/// `latest_ndvi × 100`, else a neutral 50.
fn health_proxy(site: &Site) -> f64 {
    site.health_score
        .or_else(|| site.latest_ndvi.map(|ndvi| ndvi * 100.0))
        .unwrap_or(50.0)
}
