//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering the full REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "atlas-marketplace",
        description = "Investor attractiveness scoring and marketplace lifecycle API"
    ),
    paths(
        handlers::listing::publish_listing,
        handlers::listing::list_listings,
        handlers::listing::get_listing,
        handlers::listing::unpublish_listing,
        handlers::listing::compute_site_score,
        handlers::submission::submit_interest,
        handlers::submission::list_submissions,
        handlers::submission::unread_count,
        handlers::submission::mark_read,
        handlers::submission::mark_contacted,
        handlers::system::health_handler,
        handlers::system::investment_types_handler,
    ),
    tags(
        (name = "Listings", description = "Listing lifecycle and scoring"),
        (name = "Submissions", description = "Investor interest intake and owner workflow"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_covers_all_operations() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().unwrap_or_default();
        for path in [
            "/api/v1/listings",
            "/api/v1/listings/{site_id}",
            "/api/v1/scores",
            "/api/v1/submissions",
            "/api/v1/submissions/unread-count",
            "/api/v1/submissions/{id}/read",
            "/api/v1/submissions/{id}/contacted",
            "/health",
            "/config/investment-types",
        ] {
            assert!(json.contains(path), "missing path {path}");
        }
        // Error bodies referenced by the annotations resolve to a schema.
        assert!(json.contains("ErrorResponse"));
    }
}
