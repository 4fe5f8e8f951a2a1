//! Driving ports for topic administration.

use async_trait::async_trait;
use pagination::{PageRequest, Pagination};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::topic::Topic;

use super::topic_repository::{CascadeOutcome, TopicFilter};

/// Raw topic creation input as received on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    /// Requested display name.
    pub name: String,
    /// Requested description.
    pub description: String,
}

/// One page of topics with its pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPage {
    /// Topics in listing order.
    pub topics: Vec<Topic>,
    /// Envelope describing the full result set.
    pub pagination: Pagination,
}

/// Read side of topic administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicsQuery: Send + Sync {
    /// Ordered page of topics under `filter`.
    async fn list(&self, filter: TopicFilter, page: PageRequest) -> Result<TopicPage, Error>;
}

/// Write side of topic administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicsCommand: Send + Sync {
    /// Validate and create a topic; new topics always start active.
    async fn create(&self, new_topic: NewTopic) -> Result<Topic, Error>;

    /// Toggle the activity flag, failing with `not_found` when absent.
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Topic, Error>;

    /// Cascade-delete the topic and every entry referencing it.
    ///
    /// Idempotent: deleting an absent topic succeeds with
    /// `topic_deleted = false`.
    async fn delete(&self, id: Uuid) -> Result<CascadeOutcome, Error>;
}
