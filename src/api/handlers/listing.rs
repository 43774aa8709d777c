//! Listing handlers: publish, list, get, unpublish, and scoring.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ListingListResponse, PaginationMeta, PaginationParams, PublishListingRequest,
    PublishListingResponse, ScoreRequest,
};
use crate::app_state::AppState;
use crate::domain::{Listing, SiteId};
use crate::error::{ErrorResponse, MarketplaceError};

/// `POST /listings` — Publish a site to the marketplace.
///
/// Upsert keyed by `site_id`: re-publishing an already listed site
/// overwrites the listing in place. Responds 201 on insert, 200 on
/// update.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on storage failure.
#[utoipa::path(
    post,
    path = "/api/v1/listings",
    tag = "Listings",
    summary = "Publish a site to the marketplace",
    description = "Computes a fresh investor attractiveness score for the site and publishes (or re-publishes) its listing. Publishing the same site twice updates the existing listing instead of duplicating it.",
    request_body = PublishListingRequest,
    responses(
        (status = 201, description = "Listing created", body = PublishListingResponse),
        (status = 200, description = "Existing listing updated", body = PublishListingResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn publish_listing(
    State(state): State<AppState>,
    Json(req): Json<PublishListingRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let outcome = state
        .marketplace
        .publish(
            &req.site,
            req.co2_credits_available,
            req.co2_price_per_ton,
            req.ndvi_history.as_deref(),
        )
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let response = PublishListingResponse {
        listing: outcome.listing,
        created: outcome.created,
    };
    Ok((status, Json(response)))
}

/// `GET /listings` — List active listings with pagination.
///
/// The store returns listings in persisted order; any sorting by score,
/// area, or recency is the caller's concern.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    tag = "Listings",
    summary = "List active listings",
    description = "Returns a paginated list of all active marketplace listings in persisted order.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated listing feed"),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let params = params.clamped();
    let listings = state.marketplace.active_listings().await?;

    #[allow(clippy::cast_possible_truncation)]
    let total = listings.len() as u32;
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    // Widen before multiplying: a hostile `page` close to u32::MAX must
    // yield an empty page, not an overflow panic.
    let start = usize::try_from(u64::from(page - 1) * u64::from(per_page)).unwrap_or(usize::MAX);
    let data: Vec<Listing> = listings
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    Ok(Json(ListingListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// `GET /listings/:site_id` — Get the listing for a site.
///
/// # Errors
///
/// Returns [`MarketplaceError::ListingNotFound`] if the site is not
/// listed.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{site_id}",
    tag = "Listings",
    summary = "Get a site's listing",
    params(
        ("site_id" = i64, Path, description = "Site identifier"),
    ),
    responses(
        (status = 200, description = "Listing details"),
        (status = 404, description = "Site not listed", body = ErrorResponse),
    )
)]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(site_id): Path<SiteId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let listing = state
        .marketplace
        .find_by_site(site_id)
        .await?
        .ok_or(MarketplaceError::ListingNotFound(site_id))?;
    Ok(Json(listing))
}

/// `DELETE /listings/:site_id` — Remove a site from the marketplace.
///
/// Idempotent: unpublishing a site that is not listed still responds
/// 204.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on storage failure.
#[utoipa::path(
    delete,
    path = "/api/v1/listings/{site_id}",
    tag = "Listings",
    summary = "Unpublish a site",
    params(
        ("site_id" = i64, Path, description = "Site identifier"),
    ),
    responses(
        (status = 204, description = "Listing removed (or was never present)"),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn unpublish_listing(
    State(state): State<AppState>,
    Path(site_id): Path<SiteId>,
) -> Result<impl IntoResponse, MarketplaceError> {
    state.marketplace.unpublish(site_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /scores` — Compute an investor score without publishing.
///
/// Pure computation; nothing is persisted.
#[utoipa::path(
    post,
    path = "/api/v1/scores",
    tag = "Listings",
    summary = "Compute an investor attractiveness score",
    description = "Computes the five-factor investor attractiveness score for a site without publishing it.",
    request_body = ScoreRequest,
    responses(
        (status = 200, description = "Computed score"),
    )
)]
pub async fn compute_site_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> impl IntoResponse {
    let score = state
        .marketplace
        .score(&req.site, req.ndvi_history.as_deref());
    Json(score)
}

/// Listing management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/listings", post(publish_listing).get(list_listings))
        .route(
            "/listings/{site_id}",
            get(get_listing).delete(unpublish_listing),
        )
        .route("/scores", post(compute_site_score))
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::site::SiteType;
    use crate::domain::{EventBus, Site};
    use crate::persistence::memory::MemorySlotStore;
    use crate::service::MarketplaceService;
    use crate::store::MarketplaceStore;

    fn make_state() -> AppState {
        let store = Arc::new(MarketplaceStore::new(Arc::new(MemorySlotStore::new())));
        let event_bus = EventBus::new(16);
        AppState {
            marketplace: Arc::new(MarketplaceService::new(store, event_bus.clone())),
            event_bus,
        }
    }

    fn make_site(id: SiteId) -> Site {
        Site {
            id,
            name: format!("Site {id}"),
            site_type: SiteType::Field,
            description: None,
            area_hectares: Some(25.0),
            crop_type: Some("Barley".to_string()),
            forest_type: None,
            latest_ndvi: Some(0.6),
            health_score: None,
            fire_risk_level: None,
        }
    }

    async fn response_json(result: Result<impl IntoResponse, MarketplaceError>) -> serde_json::Value {
        let Ok(response) = result else {
            panic!("handler failed");
        };
        let response = response.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await;
        let Ok(bytes) = bytes else {
            panic!("body read failed");
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    #[tokio::test]
    async fn list_paginates_published_listings() {
        let state = make_state();
        for id in 1..=3 {
            let _ = state.marketplace.publish(&make_site(id), None, None, None).await;
        }

        let result = list_listings(
            State(state),
            Query(PaginationParams { page: 1, per_page: 2 }),
        )
        .await;
        let body = response_json(result).await;
        assert_eq!(body["data"].as_array().map_or(0, Vec::len), 2);
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["total_pages"], 2);
    }

    #[tokio::test]
    async fn huge_page_number_yields_empty_page() {
        let state = make_state();
        let _ = state.marketplace.publish(&make_site(1), None, None, None).await;

        let result = list_listings(
            State(state),
            Query(PaginationParams {
                page: u32::MAX,
                per_page: 100,
            }),
        )
        .await;
        let body = response_json(result).await;
        assert_eq!(body["data"].as_array().map_or(usize::MAX, Vec::len), 0);
        assert_eq!(body["pagination"]["total"], 1);
    }
}
