//! Per-connection subscription manager.
//!
//! Tracks which site IDs a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::SiteId;

/// Manages the set of site subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed site IDs. If `subscribe_all` is true, this set is ignored.
    site_ids: HashSet<SiteId>,
    /// Whether the client subscribes to all sites (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds site IDs to the subscription set. `"*"` enables the wildcard.
    pub fn subscribe(&mut self, ids: &[SiteId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for id in ids {
            self.site_ids.insert(*id);
        }
    }

    /// Removes site IDs from the subscription set.
    pub fn unsubscribe(&mut self, ids: &[SiteId]) {
        for id in ids {
            self.site_ids.remove(id);
        }
    }

    /// Returns `true` if the given site ID matches the subscription filter.
    #[must_use]
    pub fn matches(&self, site_id: SiteId) -> bool {
        self.subscribe_all || self.site_ids.contains(&site_id)
    }

    /// Returns the number of explicitly subscribed site IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.site_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
