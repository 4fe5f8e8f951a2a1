//! Listing query routing and ordering.
//!
//! The document store can filter by topic id and push count/offset/limit
//! down, but it has no substring operator. Topic-name search therefore
//! runs in memory: fetch the whole collection, filter client-side, and
//! paginate the filtered list. [`ListingPlan`] decides which path a
//! request takes so callers never encode that knowledge themselves; a
//! future store with native text search only has to change the plan
//! execution, not its callers.

use std::cmp::Ordering;

use uuid::Uuid;

use super::entry::Entry;

/// How a listing request will be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPlan {
    /// Store-assisted: unfiltered count plus ordered offset/limit query.
    Unfiltered,
    /// Store-assisted: both queries filtered by topic id.
    TopicId(Uuid),
    /// In-memory: fetch everything, case-insensitive substring match on
    /// the denormalised topic name, paginate the filtered list.
    NameContains(String),
}

impl ListingPlan {
    /// Route raw filter parameters to an evaluation path.
    ///
    /// `topic_id` wins when both filters are supplied; a blank
    /// `topic_name` is no filter at all.
    pub fn from_filters(topic_id: Option<Uuid>, topic_name: Option<&str>) -> Self {
        if let Some(id) = topic_id {
            return Self::TopicId(id);
        }
        match topic_name.map(str::trim).filter(|needle| !needle.is_empty()) {
            Some(needle) => Self::NameContains(needle.to_owned()),
            None => Self::Unfiltered,
        }
    }
}

/// Listing order shared by every delivery path: newest first, ties broken
/// by store-assigned id ascending so pagination is reproducible across
/// requests.
pub fn listing_order(a: &Entry, b: &Entry) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Case-insensitive substring match on the denormalised topic name.
pub fn topic_name_matches(entry: &Entry, needle: &str) -> bool {
    entry
        .topic_name
        .to_lowercase()
        .contains(&needle.to_lowercase())
}
