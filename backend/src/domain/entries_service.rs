//! Entry submission, listing, and export service.
//!
//! Submission runs the full intake pipeline: field validators, the
//! external platform-username predicate, the duplicate scan, then the
//! store write. The read side routes every listing through
//! [`ListingPlan`] so the store-assisted and in-memory pagination paths
//! stay behind one seam.
//!
//! The duplicate scan reads current store state and then writes; the two
//! steps are not transactional across processes, so two racing
//! submissions can both pass the scan. The store adapter is responsible
//! for whatever stronger guarantee it can offer.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Pagination, slice_page};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::entry::{Entry, EntryDraft, validate_form};
use crate::domain::export::entries_to_csv;
use crate::domain::fields::TelegramPolicy;
use crate::domain::listing::{ListingPlan, topic_name_matches};
use crate::domain::ports::{
    EntriesCommand, EntriesQuery, EntryListRequest, EntryPage, EntryRepository,
    EntryRepositoryError, PlatformUsernameVerifier, SubmitEntryRequest, TopicRepository,
    TopicRepositoryError, UsernameVerifierError,
};
use crate::domain::uniqueness::{UniquenessScope, find_conflict};

/// Entry service implementing the driving ports.
pub struct EntryService<T, E, V> {
    topics: Arc<T>,
    entries: Arc<E>,
    verifier: Arc<V>,
    telegram_policy: TelegramPolicy,
    uniqueness_scope: UniquenessScope,
}

impl<T, E, V> EntryService<T, E, V> {
    /// Create a new service over the stores and the username predicate.
    pub fn new(
        topics: Arc<T>,
        entries: Arc<E>,
        verifier: Arc<V>,
        telegram_policy: TelegramPolicy,
        uniqueness_scope: UniquenessScope,
    ) -> Self {
        Self {
            topics,
            entries,
            verifier,
            telegram_policy,
            uniqueness_scope,
        }
    }
}

impl<T, E, V> EntryService<T, E, V>
where
    T: TopicRepository,
    E: EntryRepository,
    V: PlatformUsernameVerifier,
{
    fn map_topic_store_error(error: &TopicRepositoryError) -> Error {
        error!(%error, "topic store failure");
        match error {
            TopicRepositoryError::Connection { .. } => {
                Error::service_unavailable("topic store unavailable")
            }
            TopicRepositoryError::Query { .. } => Error::internal("topic store failure"),
        }
    }

    fn map_entry_store_error(error: &EntryRepositoryError) -> Error {
        error!(%error, "entry store failure");
        match error {
            EntryRepositoryError::Connection { .. } => {
                Error::service_unavailable("entry store unavailable")
            }
            EntryRepositoryError::Query { .. } => Error::internal("entry store failure"),
        }
    }

    fn map_verifier_error(error: &UsernameVerifierError) -> Error {
        error!(%error, "platform username verification failed to produce a verdict");
        Error::service_unavailable("platform username verification is temporarily unavailable")
            .with_details(json!({ "code": "verifier_unavailable" }))
    }

    async fn entries_in_scope(&self, topic_id: Uuid) -> Result<Vec<Entry>, Error> {
        let filter = match self.uniqueness_scope {
            UniquenessScope::PerTopic => Some(topic_id),
            UniquenessScope::Global => None,
        };
        self.entries
            .list_all(filter)
            .await
            .map_err(|error| Self::map_entry_store_error(&error))
    }

    async fn collect_for_plan(&self, plan: ListingPlan) -> Result<Vec<Entry>, Error> {
        let entries = match plan {
            ListingPlan::Unfiltered => self.entries.list_all(None).await,
            ListingPlan::TopicId(id) => self.entries.list_all(Some(id)).await,
            ListingPlan::NameContains(needle) => {
                return Ok(self
                    .entries
                    .list_all(None)
                    .await
                    .map_err(|error| Self::map_entry_store_error(&error))?
                    .into_iter()
                    .filter(|entry| topic_name_matches(entry, &needle))
                    .collect());
            }
        };
        entries.map_err(|error| Self::map_entry_store_error(&error))
    }
}

#[async_trait]
impl<T, E, V> EntriesQuery for EntryService<T, E, V>
where
    T: TopicRepository,
    E: EntryRepository,
    V: PlatformUsernameVerifier,
{
    async fn list(&self, request: EntryListRequest) -> Result<EntryPage, Error> {
        let EntryListRequest { plan, page } = request;
        match plan {
            ListingPlan::Unfiltered | ListingPlan::TopicId(_) => {
                let topic_id = match plan {
                    ListingPlan::TopicId(id) => Some(id),
                    _ => None,
                };
                let total = self
                    .entries
                    .count(topic_id)
                    .await
                    .map_err(|error| Self::map_entry_store_error(&error))?;
                let entries = self
                    .entries
                    .list_page(topic_id, page.offset(), page.limit())
                    .await
                    .map_err(|error| Self::map_entry_store_error(&error))?;
                Ok(EntryPage {
                    entries,
                    pagination: Pagination::for_total(page, total),
                })
            }
            ListingPlan::NameContains(_) => {
                // The store has no substring operator: filter the full
                // collection here and paginate the filtered list.
                let filtered = self.collect_for_plan(plan).await?;
                let total = u64::try_from(filtered.len()).unwrap_or(u64::MAX);
                Ok(EntryPage {
                    entries: slice_page(&filtered, page),
                    pagination: Pagination::for_total(page, total),
                })
            }
        }
    }

    async fn export(&self, plan: ListingPlan) -> Result<String, Error> {
        let entries = self.collect_for_plan(plan).await?;
        Ok(entries_to_csv(&entries))
    }
}

#[async_trait]
impl<T, E, V> EntriesCommand for EntryService<T, E, V>
where
    T: TopicRepository,
    E: EntryRepository,
    V: PlatformUsernameVerifier,
{
    async fn submit(&self, request: SubmitEntryRequest) -> Result<Entry, Error> {
        let SubmitEntryRequest { topic_id, form } = request;

        let fields = validate_form(&form, self.telegram_policy).map_err(|failures| {
            Error::invalid_request("entry validation failed")
                .with_details(json!({ "fields": failures }))
        })?;

        let topic = self
            .topics
            .find_by_id(topic_id)
            .await
            .map_err(|error| Self::map_topic_store_error(&error))?
            .ok_or_else(|| Error::not_found("topic not found"))?;
        if !topic.is_active {
            return Err(Error::invalid_request("topic is not accepting submissions")
                .with_details(json!({ "code": "topic_inactive" })));
        }

        let approved = self
            .verifier
            .verify(fields.platform_username.as_ref())
            .await
            .map_err(|error| Self::map_verifier_error(&error))?;
        if !approved {
            return Err(
                Error::invalid_request("platform username failed verification").with_details(
                    json!({ "field": "platformUsername", "code": "platform_username_rejected" }),
                ),
            );
        }

        let draft = EntryDraft {
            topic_id,
            topic_name: topic.name.to_string(),
            telegram_username: fields.telegram_username,
            platform_username: fields.platform_username,
            wallet_address: fields.wallet_address,
            discord_username: fields.discord_username,
            email: fields.email,
        };

        let existing = self.entries_in_scope(topic_id).await?;
        if let Some(violation) = find_conflict(&draft, &existing, self.uniqueness_scope) {
            return Err(Error::conflict(violation.to_string())
                .with_details(json!({ "constraint": violation.constraint() })));
        }

        self.entries
            .insert(draft)
            .await
            .map_err(|error| Self::map_entry_store_error(&error))
    }

    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        let deleted = self
            .entries
            .delete(id)
            .await
            .map_err(|error| Self::map_entry_store_error(&error))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("entry not found"))
        }
    }
}
