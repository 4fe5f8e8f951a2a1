//! Topic administration service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Pagination};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::fields::FieldError;
use crate::domain::ports::{
    CascadeOutcome, NewTopic, TopicFilter, TopicPage, TopicRepository, TopicRepositoryError,
    TopicsCommand, TopicsQuery,
};
use crate::domain::topic::{Topic, TopicDraft};

/// Topic service implementing the driving ports.
pub struct TopicService<R> {
    topics: Arc<R>,
}

impl<R> TopicService<R> {
    /// Create a new service over a topic store.
    pub fn new(topics: Arc<R>) -> Self {
        Self { topics }
    }
}

impl<R> TopicService<R>
where
    R: TopicRepository,
{
    fn map_store_error(error: &TopicRepositoryError) -> Error {
        // Full detail stays in the log; callers get a generic failure.
        error!(%error, "topic store failure");
        match error {
            TopicRepositoryError::Connection { .. } => {
                Error::service_unavailable("topic store unavailable")
            }
            TopicRepositoryError::Query { .. } => Error::internal("topic store failure"),
        }
    }

    fn validation_error(failures: &[(&'static str, FieldError)]) -> Error {
        let fields: serde_json::Map<String, serde_json::Value> = failures
            .iter()
            .map(|(field, reason)| ((*field).to_owned(), json!(reason.to_string())))
            .collect();
        Error::invalid_request("topic validation failed").with_details(json!({ "fields": fields }))
    }
}

#[async_trait]
impl<R> TopicsQuery for TopicService<R>
where
    R: TopicRepository,
{
    async fn list(&self, filter: TopicFilter, page: PageRequest) -> Result<TopicPage, Error> {
        let total = self
            .topics
            .count(filter)
            .await
            .map_err(|error| Self::map_store_error(&error))?;
        let topics = self
            .topics
            .list(filter, page.offset(), page.limit())
            .await
            .map_err(|error| Self::map_store_error(&error))?;
        Ok(TopicPage {
            topics,
            pagination: Pagination::for_total(page, total),
        })
    }
}

#[async_trait]
impl<R> TopicsCommand for TopicService<R>
where
    R: TopicRepository,
{
    async fn create(&self, new_topic: NewTopic) -> Result<Topic, Error> {
        let draft = TopicDraft::from_form(&new_topic.name, &new_topic.description)
            .map_err(|failures| Self::validation_error(&failures))?;
        self.topics
            .insert(draft)
            .await
            .map_err(|error| Self::map_store_error(&error))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Topic, Error> {
        self.topics
            .set_active(id, is_active)
            .await
            .map_err(|error| Self::map_store_error(&error))?
            .ok_or_else(|| Error::not_found("topic not found"))
    }

    async fn delete(&self, id: Uuid) -> Result<CascadeOutcome, Error> {
        self.topics
            .delete_with_entries(id)
            .await
            .map_err(|error| Self::map_store_error(&error))
    }
}
