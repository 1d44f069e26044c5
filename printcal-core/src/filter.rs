//! Category filters for the aggregated view.

use std::collections::BTreeSet;

use crate::event::{NormalizedEvent, SourceKind};

/// Bucket key for custom events that don't name a category.
pub const DEFAULT_CATEGORY: &str = "custom";

/// The bucket a record is filtered under. Site activities share the single
/// "monthly" bucket; custom events are keyed by their own category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterBucket {
    Monthly,
    Category(String),
}

impl FilterBucket {
    /// Bucket for a normalized event. Notes are private to the member and
    /// never filterable.
    pub fn for_event(event: &NormalizedEvent) -> Option<FilterBucket> {
        match event.kind {
            SourceKind::Activity => Some(FilterBucket::Monthly),
            SourceKind::Custom => Some(FilterBucket::Category(
                event
                    .category
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            )),
            SourceKind::Note => None,
        }
    }

    /// Parse a user-facing bucket name ("monthly" or a category name).
    pub fn parse(name: &str) -> FilterBucket {
        if name.eq_ignore_ascii_case("monthly") {
            FilterBucket::Monthly
        } else {
            FilterBucket::Category(name.to_string())
        }
    }
}

/// Which buckets are currently hidden. Everything is visible by default.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    hidden: BTreeSet<FilterBucket>,
}

impl FilterSet {
    pub fn toggle(&mut self, bucket: FilterBucket) {
        if !self.hidden.remove(&bucket) {
            self.hidden.insert(bucket);
        }
    }

    pub fn hide(&mut self, bucket: FilterBucket) {
        self.hidden.insert(bucket);
    }

    pub fn is_visible(&self, event: &NormalizedEvent) -> bool {
        match FilterBucket::for_event(event) {
            Some(bucket) => !self.hidden.contains(&bucket),
            None => true,
        }
    }

    /// Drop hidden events, keeping order.
    pub fn apply(&self, events: &[NormalizedEvent]) -> Vec<NormalizedEvent> {
        events
            .iter()
            .filter(|e| self.is_visible(e))
            .cloned()
            .collect()
    }
}
