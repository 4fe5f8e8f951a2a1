//! Port for entry persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entry::{Entry, EntryDraft};

/// Errors raised by entry store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryRepositoryError {
    /// The store could not be reached.
    #[error("entry store unreachable: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("entry store query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl EntryRepositoryError {
    /// Build an [`EntryRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build an [`EntryRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for entry storage and retrieval.
///
/// Every listing method returns entries ordered by creation instant
/// descending, ties broken by id ascending, so pagination is
/// reproducible across requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a draft, assigning id and creation instant.
    async fn insert(&self, draft: EntryDraft) -> Result<Entry, EntryRepositoryError>;

    /// Delete an entry by id, reporting whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool, EntryRepositoryError>;

    /// Ordered window of entries, optionally filtered by topic id.
    ///
    /// Count and window are the store-assisted pagination pair; the
    /// store evaluates both without materialising the full collection.
    async fn list_page(
        &self,
        topic_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Entry>, EntryRepositoryError>;

    /// Number of entries, optionally filtered by topic id.
    async fn count(&self, topic_id: Option<Uuid>) -> Result<u64, EntryRepositoryError>;

    /// Every entry, ordered, optionally filtered by topic id.
    ///
    /// Used by the duplicate scan, exports, and the in-memory topic-name
    /// filter the store cannot evaluate itself. Fetching the whole
    /// collection is a known scalability cliff; callers go through the
    /// listing plan so a store with native text search can retire the
    /// unfiltered variant without touching them.
    async fn list_all(&self, topic_id: Option<Uuid>) -> Result<Vec<Entry>, EntryRepositoryError>;
}
