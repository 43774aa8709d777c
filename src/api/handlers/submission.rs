//! Submission handlers: intake, owner feed, and read/contacted
//! transitions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::api::dto::{SubmissionListResponse, SubmitInterestRequest, UnreadCountResponse};
use crate::app_state::AppState;
use crate::domain::{SiteId, SubmissionId};
use crate::error::{ErrorResponse, MarketplaceError};

/// Query parameters for `GET /submissions`.
#[derive(Debug, Deserialize)]
pub struct SubmissionFilter {
    /// Restrict to one site. Without it, all submissions are returned
    /// most-recent-first.
    #[serde(default)]
    pub site_id: Option<SiteId>,
}

/// `POST /submissions` — Submit investment interest against a listing.
///
/// Append-only: the same investor may submit any number of times, each
/// producing an independent record.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on storage failure.
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    tag = "Submissions",
    summary = "Submit investment interest",
    request_body = SubmitInterestRequest,
    responses(
        (status = 201, description = "Submission recorded"),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn submit_interest(
    State(state): State<AppState>,
    Json(req): Json<SubmitInterestRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let submission = state.marketplace.submit_interest(req.into()).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// `GET /submissions` — Owner's submission feed.
///
/// With `site_id`, submissions for that site in persisted order;
/// without, all submissions sorted most-recent-first.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/submissions",
    tag = "Submissions",
    summary = "List investment submissions",
    params(
        ("site_id" = Option<i64>, Query, description = "Restrict to one site"),
    ),
    responses(
        (status = 200, description = "Submission feed"),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(filter): Query<SubmissionFilter>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let data = state.marketplace.submissions(filter.site_id).await?;
    Ok(Json(SubmissionListResponse { data }))
}

/// `GET /submissions/unread-count` — Global unread badge counter.
///
/// # Errors
///
/// Returns [`MarketplaceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/submissions/unread-count",
    tag = "Submissions",
    summary = "Count unread submissions",
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn unread_count(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let unread = state.marketplace.unread_count().await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// `POST /submissions/:id/read` — Mark a submission as read.
///
/// # Errors
///
/// Returns [`MarketplaceError::SubmissionNotFound`] on unknown id.
#[utoipa::path(
    post,
    path = "/api/v1/submissions/{id}/read",
    tag = "Submissions",
    summary = "Mark a submission as read",
    params(
        ("id" = uuid::Uuid, Path, description = "Submission UUID"),
    ),
    responses(
        (status = 200, description = "Updated submission"),
        (status = 404, description = "Submission not found", body = ErrorResponse),
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let id = SubmissionId::from_uuid(id);
    let submission = state
        .marketplace
        .mark_read(id)
        .await?
        .ok_or(MarketplaceError::SubmissionNotFound(id))?;
    Ok(Json(submission))
}

/// `POST /submissions/:id/contacted` — Mark a submission as contacted.
///
/// Sets both flags in a single update: contacting implies having read.
///
/// # Errors
///
/// Returns [`MarketplaceError::SubmissionNotFound`] on unknown id.
#[utoipa::path(
    post,
    path = "/api/v1/submissions/{id}/contacted",
    tag = "Submissions",
    summary = "Mark a submission as contacted",
    params(
        ("id" = uuid::Uuid, Path, description = "Submission UUID"),
    ),
    responses(
        (status = 200, description = "Updated submission"),
        (status = 404, description = "Submission not found", body = ErrorResponse),
    )
)]
pub async fn mark_contacted(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let id = SubmissionId::from_uuid(id);
    let submission = state
        .marketplace
        .mark_contacted(id)
        .await?
        .ok_or(MarketplaceError::SubmissionNotFound(id))?;
    Ok(Json(submission))
}

/// Submission routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/submissions", post(submit_interest).get(list_submissions))
        .route("/submissions/unread-count", get(unread_count))
        .route("/submissions/{id}/read", post(mark_read))
        .route("/submissions/{id}/contacted", post(mark_contacted))
}
