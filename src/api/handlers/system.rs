//! System endpoints: health check and investment type catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Supported investment type info.
#[derive(Debug, Serialize, ToSchema)]
struct InvestmentTypeInfo {
    investment_type: &'static str,
    description: &'static str,
    requires_co2_listing: bool,
}

/// `GET /config/investment-types` — List supported investment types.
#[utoipa::path(
    get,
    path = "/config/investment-types",
    tag = "System",
    summary = "List supported investment types",
    description = "Returns metadata for every investment type a submission can declare.",
    responses(
        (status = 200, description = "Investment type catalog", body = Vec<InvestmentTypeInfo>),
    )
)]
pub async fn investment_types_handler() -> impl IntoResponse {
    let types = vec![
        InvestmentTypeInfo {
            investment_type: "CO2_CREDITS",
            description: "Purchase of carbon credits offered by the listing",
            requires_co2_listing: true,
        },
        InvestmentTypeInfo {
            investment_type: "SITE_INVESTMENT",
            description: "Direct investment in the site's operation",
            requires_co2_listing: false,
        },
        InvestmentTypeInfo {
            investment_type: "BOTH",
            description: "Carbon credits plus direct site investment",
            requires_co2_listing: true,
        },
    ];
    (StatusCode::OK, Json(types))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/investment-types", get(investment_types_handler))
}
