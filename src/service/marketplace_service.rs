//! Marketplace service: orchestrates listing and submission operations
//! and emits events.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    EventBus, InvestorScore, Listing, MarketEvent, PublishOutcome, Site, SiteId, Submission,
    SubmissionDraft, SubmissionId, compute_score,
};
use crate::error::MarketplaceError;
use crate::store::MarketplaceStore;

/// Orchestration layer for all marketplace operations.
///
/// Stateless coordinator: owns references to [`MarketplaceStore`] for
/// state and [`EventBus`] for event emission. Every mutation method
/// follows the pattern: score/build → store mutation → emit event →
/// return result.
#[derive(Debug, Clone)]
pub struct MarketplaceService {
    store: Arc<MarketplaceStore>,
    event_bus: EventBus,
}

impl MarketplaceService {
    /// Creates a new `MarketplaceService`.
    #[must_use]
    pub fn new(store: Arc<MarketplaceStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Computes the investor attractiveness score for a site without
    /// touching the store.
    #[must_use]
    pub fn score(&self, site: &Site, ndvi_history: Option<&[f64]>) -> InvestorScore {
        compute_score(site, ndvi_history)
    }

    /// Publishes a site to the marketplace.
    ///
    /// Computes a fresh [`InvestorScore`] and upserts the listing keyed
    /// by `site_id`: re-publishing an already listed site overwrites the
    /// listing in place, preserving its id.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the listings slot cannot be
    /// read or written.
    pub async fn publish(
        &self,
        site: &Site,
        co2_credits: Option<f64>,
        co2_price: Option<f64>,
        ndvi_history: Option<&[f64]>,
    ) -> Result<PublishOutcome, MarketplaceError> {
        let score = compute_score(site, ndvi_history);
        let listing = Listing::from_site(site, score, co2_credits, co2_price);
        let (listing, created) = self.store.upsert_listing(listing).await?;

        let _ = self.event_bus.publish(MarketEvent::ListingPublished {
            listing_id: listing.id,
            site_id: listing.site_id,
            total_score: listing.investor_score.total_score,
            created,
            timestamp: Utc::now(),
        });

        tracing::info!(
            site_id = listing.site_id,
            listing_id = %listing.id,
            total_score = listing.investor_score.total_score,
            created,
            "listing published"
        );
        Ok(PublishOutcome { listing, created })
    }

    /// Removes a site's listing from the marketplace. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the listings slot cannot be
    /// read or written.
    pub async fn unpublish(&self, site_id: SiteId) -> Result<(), MarketplaceError> {
        self.store.remove_listings_for_site(site_id).await?;

        let _ = self.event_bus.publish(MarketEvent::ListingUnpublished {
            site_id,
            timestamp: Utc::now(),
        });

        tracing::info!(site_id, "listing unpublished");
        Ok(())
    }

    /// Returns all active listings in persisted order.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the listings slot cannot be
    /// read.
    pub async fn active_listings(&self) -> Result<Vec<Listing>, MarketplaceError> {
        self.store.active_listings().await
    }

    /// Looks up the listing for a single site; `None` on miss.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the listings slot cannot be
    /// read.
    pub async fn find_by_site(&self, site_id: SiteId) -> Result<Option<Listing>, MarketplaceError> {
        self.store.find_by_site(site_id).await
    }

    /// Records an investor's expression of interest. Append-only; the
    /// same investor may submit any number of times.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the submissions slot cannot be
    /// read or written.
    pub async fn submit_interest(
        &self,
        draft: SubmissionDraft,
    ) -> Result<Submission, MarketplaceError> {
        let submission = Submission::from_draft(draft);
        let submission = self.store.append_submission(submission).await?;

        let _ = self.event_bus.publish(MarketEvent::InterestSubmitted {
            submission_id: submission.id,
            listing_id: submission.listing_id,
            site_id: submission.site_id,
            investment_type: submission.investment_type,
            timestamp: Utc::now(),
        });

        tracing::info!(
            submission_id = %submission.id,
            site_id = submission.site_id,
            "investment interest submitted"
        );
        Ok(submission)
    }

    /// Returns submissions: filtered to one site in persisted order, or
    /// all submissions most-recent-first.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the submissions slot cannot be
    /// read.
    pub async fn submissions(
        &self,
        site_id: Option<SiteId>,
    ) -> Result<Vec<Submission>, MarketplaceError> {
        self.store.submissions(site_id).await
    }

    /// Marks a submission as read; `None` on unknown id.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the submissions slot cannot be
    /// read or written.
    pub async fn mark_read(
        &self,
        id: SubmissionId,
    ) -> Result<Option<Submission>, MarketplaceError> {
        let updated = self.store.mark_read(id).await?;

        if let Some(submission) = &updated {
            let _ = self.event_bus.publish(MarketEvent::SubmissionRead {
                submission_id: submission.id,
                site_id: submission.site_id,
                timestamp: Utc::now(),
            });
        }
        Ok(updated)
    }

    /// Marks a submission as contacted (which implies read); `None` on
    /// unknown id.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the submissions slot cannot be
    /// read or written.
    pub async fn mark_contacted(
        &self,
        id: SubmissionId,
    ) -> Result<Option<Submission>, MarketplaceError> {
        let updated = self.store.mark_contacted(id).await?;

        if let Some(submission) = &updated {
            let _ = self.event_bus.publish(MarketEvent::SubmissionContacted {
                submission_id: submission.id,
                site_id: submission.site_id,
                timestamp: Utc::now(),
            });
        }
        Ok(updated)
    }

    /// Counts unread submissions across all sites (global notification
    /// badge).
    ///
    /// # Errors
    ///
    /// Returns a [`MarketplaceError`] if the submissions slot cannot be
    /// read.
    pub async fn unread_count(&self) -> Result<usize, MarketplaceError> {
        self.store.count_unread().await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::site::SiteType;
    use crate::domain::{InvestmentType, ListingId};
    use crate::persistence::memory::MemorySlotStore;

    fn make_service() -> MarketplaceService {
        let store = MarketplaceStore::new(Arc::new(MemorySlotStore::new()));
        MarketplaceService::new(Arc::new(store), EventBus::new(100))
    }

    fn make_site(id: SiteId) -> Site {
        Site {
            id,
            name: format!("Site {id}"),
            site_type: SiteType::Field,
            description: None,
            area_hectares: Some(55.0),
            crop_type: Some("Maize".to_string()),
            forest_type: None,
            latest_ndvi: Some(0.7),
            health_score: Some(80.0),
            fire_risk_level: None,
        }
    }

    fn make_draft(site_id: SiteId, listing_id: ListingId) -> SubmissionDraft {
        SubmissionDraft {
            listing_id,
            site_id,
            site_name: format!("Site {site_id}"),
            investor_name: "B. Investor".to_string(),
            investor_email: "b@example.com".to_string(),
            investor_phone: Some("+212600000000".to_string()),
            investment_type: InvestmentType::Co2Credits,
            proposed_amount_dh: None,
            message: Some("Interested in credits".to_string()),
        }
    }

    #[tokio::test]
    async fn publish_emits_event() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();

        let result = service.publish(&make_site(1), Some(40.0), Some(90.0), None).await;
        let Ok(outcome) = result else {
            panic!("publish failed");
        };
        assert!(outcome.created);
        assert!(outcome.listing.is_active);

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "listing_published");
    }

    #[tokio::test]
    async fn republish_reports_update_not_insert() {
        let service = make_service();
        let site = make_site(1);

        let first = service.publish(&site, None, None, None).await;
        let Ok(first) = first else {
            panic!("first publish failed");
        };
        let second = service.publish(&site, Some(10.0), None, None).await;
        let Ok(second) = second else {
            panic!("second publish failed");
        };

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(second.listing.id, first.listing.id);
        assert_eq!(second.listing.co2_credits_available, Some(10.0));
    }

    #[tokio::test]
    async fn unpublish_removes_from_active_feed() {
        let service = make_service();
        let _ = service.publish(&make_site(1), None, None, None).await;

        let result = service.unpublish(1).await;
        assert!(result.is_ok());

        let active = service.active_listings().await.unwrap_or_default();
        assert!(active.is_empty());
    }

    #[tokio::test]
    async fn submit_interest_emits_event_and_persists() {
        let service = make_service();
        let published = service.publish(&make_site(1), None, None, None).await;
        let Ok(published) = published else {
            panic!("publish failed");
        };
        let mut rx = service.event_bus().subscribe();

        let result = service
            .submit_interest(make_draft(1, published.listing.id))
            .await;
        let Ok(submission) = result else {
            panic!("submission failed");
        };
        assert!(!submission.is_read);

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "interest_submitted");

        assert_eq!(service.unread_count().await.unwrap_or_default(), 1);
    }

    #[tokio::test]
    async fn mark_contacted_emits_single_event_with_both_flags() {
        let service = make_service();
        let submission = service
            .submit_interest(make_draft(1, ListingId::new()))
            .await;
        let Ok(submission) = submission else {
            panic!("submission failed");
        };
        let mut rx = service.event_bus().subscribe();

        let updated = service.mark_contacted(submission.id).await;
        let Ok(Some(updated)) = updated else {
            panic!("expected updated submission");
        };
        assert!(updated.is_read);
        assert!(updated.is_contacted);

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "submission_contacted");
        assert_eq!(service.unread_count().await.unwrap_or_default(), 0);
    }

    #[tokio::test]
    async fn mark_read_on_unknown_id_emits_nothing() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();

        let result = service.mark_read(SubmissionId::new()).await;
        let Ok(result) = result else {
            panic!("mark_read failed");
        };
        assert!(result.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn score_is_pure_passthrough() {
        let service = make_service();
        let site = make_site(1);
        let a = service.score(&site, None);
        let b = service.score(&site, None);
        assert_eq!(a.total_score, b.total_score);
        assert_eq!(a.breakdown, b.breakdown);
    }
}
