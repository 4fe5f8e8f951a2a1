//! Port for topic persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::topic::{Topic, TopicDraft};

/// Errors raised by topic store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicRepositoryError {
    /// The store could not be reached.
    #[error("topic store unreachable: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("topic store query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl TopicRepositoryError {
    /// Build a [`TopicRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`TopicRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Which topics a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicFilter {
    /// Every topic regardless of activity.
    #[default]
    All,
    /// Only topics currently accepting submissions.
    Active,
}

/// Result of a cascade deletion batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// Whether the topic document existed and was removed.
    pub topic_deleted: bool,
    /// Number of entries removed alongside it.
    pub entries_deleted: u64,
}

/// Port for topic storage and retrieval.
///
/// Listings are ordered by creation instant descending with ties broken
/// by id ascending, matching the entry listing order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Insert a draft, assigning id and creation instant.
    ///
    /// New topics start active.
    async fn insert(&self, draft: TopicDraft) -> Result<Topic, TopicRepositoryError>;

    /// Fetch a topic by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Topic>, TopicRepositoryError>;

    /// Update the activity flag, returning the updated topic.
    ///
    /// Returns `None` when no topic has this id. No other field is
    /// mutable.
    async fn set_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Option<Topic>, TopicRepositoryError>;

    /// Ordered window of topics under `filter`.
    async fn list(
        &self,
        filter: TopicFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Topic>, TopicRepositoryError>;

    /// Number of topics under `filter`.
    async fn count(&self, filter: TopicFilter) -> Result<u64, TopicRepositoryError>;

    /// Atomically delete the topic and every entry referencing it.
    ///
    /// The batch is all-or-nothing: a topic without its entries, or
    /// entries without their topic, must never be observable. A missing
    /// topic is a no-op success with `topic_deleted = false`.
    async fn delete_with_entries(&self, id: Uuid)
    -> Result<CascadeOutcome, TopicRepositoryError>;
}
