//! Driving ports for entry submission, listing, and export.

use async_trait::async_trait;
use pagination::{PageRequest, Pagination};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::entry::{Entry, EntryForm};
use crate::domain::listing::ListingPlan;

/// Submission request: the raw form plus the targeted topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEntryRequest {
    /// Topic the entry is submitted against.
    pub topic_id: Uuid,
    /// Raw form fields.
    pub form: EntryForm,
}

/// Listing request: a routed filter plus the pagination window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListRequest {
    /// Evaluation path chosen by the listing plan.
    pub plan: ListingPlan,
    /// Normalised pagination window.
    pub page: PageRequest,
}

/// One page of entries with its pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPage {
    /// Entries in listing order.
    pub entries: Vec<Entry>,
    /// Envelope describing the full (filtered) result set.
    pub pagination: Pagination,
}

/// Read side of entry auditing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntriesQuery: Send + Sync {
    /// Ordered page of entries under the request's plan.
    async fn list(&self, request: EntryListRequest) -> Result<EntryPage, Error>;

    /// Every entry under `plan`, serialised to CSV.
    async fn export(&self, plan: ListingPlan) -> Result<String, Error>;
}

/// Write side of entry submission and curation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntriesCommand: Send + Sync {
    /// Validate, verify, duplicate-check, and store a submission.
    async fn submit(&self, request: SubmitEntryRequest) -> Result<Entry, Error>;

    /// Delete an entry, failing with `not_found` when absent.
    async fn delete(&self, id: Uuid) -> Result<(), Error>;
}
