//! Request/response DTOs for the REST API.

pub mod common_dto;
pub mod listing_dto;
pub mod submission_dto;

pub use common_dto::{PaginationMeta, PaginationParams};
pub use listing_dto::{ListingListResponse, PublishListingRequest, PublishListingResponse, ScoreRequest};
pub use submission_dto::{SubmissionListResponse, SubmitInterestRequest, UnreadCountResponse};
