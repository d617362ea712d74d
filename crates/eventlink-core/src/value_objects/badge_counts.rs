//! Badge counts - derived per-category tallies of unread notifications
//!
//! Never persisted; always recomputed from unread notification rows, so
//! the push path and the polling path can never disagree.

use serde::{Deserialize, Serialize};

use crate::entities::NotificationCategory;

/// Per-category unread counts plus their total.
///
/// Invariant: `total` equals the sum of all category fields. The only
/// way to build a non-empty value is through [`BadgeCounts::from_type_counts`]
/// or [`BadgeCounts::add`], both of which maintain the invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCounts {
    pub messages: i64,
    pub applications: i64,
    pub jobs: i64,
    pub ratings: i64,
    pub feedback: i64,
    pub contact_messages: i64,
    pub total: i64,
}

impl BadgeCounts {
    /// All-zero counts
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold `(category, count)` pairs into badge counts.
    ///
    /// This is the single aggregation point used by both the HTTP
    /// polling path and the live-push path.
    pub fn from_category_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NotificationCategory, i64)>,
    {
        let mut counts = Self::default();
        for (category, n) in pairs {
            counts.add(category, n);
        }
        counts
    }

    /// Add `n` unread items to a category, keeping `total` in sync.
    pub fn add(&mut self, category: NotificationCategory, n: i64) {
        match category {
            NotificationCategory::Messages => self.messages += n,
            NotificationCategory::Applications => self.applications += n,
            NotificationCategory::Jobs => self.jobs += n,
            NotificationCategory::Ratings => self.ratings += n,
            NotificationCategory::Feedback => self.feedback += n,
            NotificationCategory::ContactMessages => self.contact_messages += n,
        }
        self.total += n;
    }

    /// Get the count for a single category
    #[must_use]
    pub fn get(&self, category: NotificationCategory) -> i64 {
        match category {
            NotificationCategory::Messages => self.messages,
            NotificationCategory::Applications => self.applications,
            NotificationCategory::Jobs => self.jobs,
            NotificationCategory::Ratings => self.ratings,
            NotificationCategory::Feedback => self.feedback,
            NotificationCategory::ContactMessages => self.contact_messages,
        }
    }

    /// True when there is nothing unread
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.total == 0
    }
}
