//! Keyed collection store for listings and submissions.
//!
//! [`MarketplaceStore`] owns the two persisted collections exclusively.
//! Each public operation is one atomic read-modify-write: a per-collection
//! mutex serializes concurrent writers, and the mutated collection is
//! written back in a single slot update. The listings and submissions
//! collections are independent, so operations on one never block the
//! other.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Listing, SiteId, Submission, SubmissionId};
use crate::error::MarketplaceError;
use crate::persistence::SlotStore;

/// Slot holding the serialized listings collection.
pub const LISTINGS_SLOT: &str = "marketplace_listings";
/// Slot holding the serialized submissions collection.
pub const SUBMISSIONS_SLOT: &str = "investment_submissions";

/// Store over the listing and submission collections.
///
/// Treats [`crate::domain::Site`] and [`crate::domain::InvestorScore`]
/// as externally supplied values it copies in; it never mutates them in
/// place and never holds a live reference back to the originating site.
#[derive(Debug)]
pub struct MarketplaceStore {
    slots: Arc<dyn SlotStore>,
    listings_gate: Mutex<()>,
    submissions_gate: Mutex<()>,
}

impl MarketplaceStore {
    /// Creates a store over the given slot backend.
    #[must_use]
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self {
            slots,
            listings_gate: Mutex::new(()),
            submissions_gate: Mutex::new(()),
        }
    }

    async fn load_listings(&self) -> Result<Vec<Listing>, MarketplaceError> {
        match self.slots.read_slot(LISTINGS_SLOT).await? {
            Some(payload) => serde_json::from_value(payload)
                .map_err(|e| MarketplaceError::Storage(format!("corrupt listings slot: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    async fn save_listings(&self, listings: &[Listing]) -> Result<(), MarketplaceError> {
        let payload = serde_json::to_value(listings)
            .map_err(|e| MarketplaceError::Internal(format!("encode listings: {e}")))?;
        self.slots.write_slot(LISTINGS_SLOT, payload).await
    }

    async fn load_submissions(&self) -> Result<Vec<Submission>, MarketplaceError> {
        match self.slots.read_slot(SUBMISSIONS_SLOT).await? {
            Some(payload) => serde_json::from_value(payload)
                .map_err(|e| MarketplaceError::Storage(format!("corrupt submissions slot: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    async fn save_submissions(&self, submissions: &[Submission]) -> Result<(), MarketplaceError> {
        let payload = serde_json::to_value(submissions)
            .map_err(|e| MarketplaceError::Internal(format!("encode submissions: {e}")))?;
        self.slots.write_slot(SUBMISSIONS_SLOT, payload).await
    }

    /// Upserts a listing keyed by `site_id`.
    ///
    /// If the site is already listed, the stored listing's `id` is kept
    /// and all other fields are overwritten from `listing`. Returns the
    /// persisted listing and whether it was a fresh insert.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read
    /// or written.
    pub async fn upsert_listing(
        &self,
        mut listing: Listing,
    ) -> Result<(Listing, bool), MarketplaceError> {
        let _gate = self.listings_gate.lock().await;
        let mut listings = self.load_listings().await?;

        let existing = listings.iter_mut().find(|l| l.site_id == listing.site_id);
        let created = match existing {
            Some(slot) => {
                listing.id = slot.id;
                *slot = listing.clone();
                false
            }
            None => {
                listings.push(listing.clone());
                true
            }
        };

        self.save_listings(&listings).await?;
        Ok((listing, created))
    }

    /// Removes all listings for the given site. Idempotent: a site that
    /// is not listed is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read
    /// or written.
    pub async fn remove_listings_for_site(&self, site_id: SiteId) -> Result<(), MarketplaceError> {
        let _gate = self.listings_gate.lock().await;
        let mut listings = self.load_listings().await?;
        let before = listings.len();
        listings.retain(|l| l.site_id != site_id);

        if listings.len() != before {
            self.save_listings(&listings).await?;
        }
        Ok(())
    }

    /// Returns all active listings in persisted (insertion) order.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read.
    pub async fn active_listings(&self) -> Result<Vec<Listing>, MarketplaceError> {
        let listings = self.load_listings().await?;
        Ok(listings.into_iter().filter(|l| l.is_active).collect())
    }

    /// Looks up the listing for a single site.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read.
    pub async fn find_by_site(&self, site_id: SiteId) -> Result<Option<Listing>, MarketplaceError> {
        let listings = self.load_listings().await?;
        Ok(listings.into_iter().find(|l| l.site_id == site_id))
    }

    /// Appends a submission to the collection. Submissions are never
    /// deduplicated; each call produces an independent record.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read
    /// or written.
    pub async fn append_submission(
        &self,
        submission: Submission,
    ) -> Result<Submission, MarketplaceError> {
        let _gate = self.submissions_gate.lock().await;
        let mut submissions = self.load_submissions().await?;
        submissions.push(submission.clone());
        self.save_submissions(&submissions).await?;
        Ok(submission)
    }

    /// Returns submissions, filtered to one site in persisted order, or
    /// all submissions sorted most-recent-first when no filter is given
    /// (the default feed owners see).
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read.
    pub async fn submissions(
        &self,
        site_id: Option<SiteId>,
    ) -> Result<Vec<Submission>, MarketplaceError> {
        let mut submissions = self.load_submissions().await?;
        match site_id {
            Some(id) => {
                submissions.retain(|s| s.site_id == id);
            }
            None => {
                submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
            }
        }
        Ok(submissions)
    }

    /// Marks a submission as read. Monotonic: the flag is never reset.
    /// Returns the updated record, or `None` if no submission has that
    /// id.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read
    /// or written.
    pub async fn mark_read(
        &self,
        id: SubmissionId,
    ) -> Result<Option<Submission>, MarketplaceError> {
        self.update_flags(id, false).await
    }

    /// Marks a submission as contacted, which implies read. Both flags
    /// are set in one persisted update so no reader can observe a torn
    /// intermediate state.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read
    /// or written.
    pub async fn mark_contacted(
        &self,
        id: SubmissionId,
    ) -> Result<Option<Submission>, MarketplaceError> {
        self.update_flags(id, true).await
    }

    async fn update_flags(
        &self,
        id: SubmissionId,
        contacted: bool,
    ) -> Result<Option<Submission>, MarketplaceError> {
        let _gate = self.submissions_gate.lock().await;
        let mut submissions = self.load_submissions().await?;

        let Some(submission) = submissions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        submission.is_read = true;
        if contacted {
            submission.is_contacted = true;
        }
        let updated = submission.clone();

        self.save_submissions(&submissions).await?;
        Ok(Some(updated))
    }

    /// Counts submissions not yet read, across all sites.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the slot cannot be read.
    pub async fn count_unread(&self) -> Result<usize, MarketplaceError> {
        let submissions = self.load_submissions().await?;
        Ok(submissions.iter().filter(|s| !s.is_read).count())
    }
}
