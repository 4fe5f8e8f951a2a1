//! In-memory document-store adapter.
//!
//! Backs both repositories with plain maps behind a single `RwLock`.
//! Holding the write guard for the whole cascade batch makes the
//! topic-plus-entries deletion atomic within the process: no reader can
//! observe the topic gone while its entries remain, or the reverse.
//! Listing methods sort on demand, mirroring the ordered queries a
//! document store would serve from an index.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::entry::{Entry, EntryDraft};
use crate::domain::listing::listing_order;
use crate::domain::ports::{
    CascadeOutcome, EntryRepository, EntryRepositoryError, TopicFilter, TopicRepository,
    TopicRepositoryError,
};
use crate::domain::topic::{Topic, TopicDraft};

#[derive(Default)]
struct Collections {
    topics: HashMap<Uuid, Topic>,
    entries: HashMap<Uuid, Entry>,
}

/// Shared in-memory store implementing both repository ports.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

const POISONED: &str = "store lock poisoned";

fn window<T>(mut items: Vec<T>, offset: u64, limit: u64) -> Vec<T> {
    let skip = usize::try_from(offset).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    if skip >= items.len() {
        return Vec::new();
    }
    items.drain(..skip);
    items.truncate(take);
    items
}

fn topic_matches(topic: &Topic, filter: TopicFilter) -> bool {
    match filter {
        TopicFilter::All => true,
        TopicFilter::Active => topic.is_active,
    }
}

fn sorted_topics(collections: &Collections, filter: TopicFilter) -> Vec<Topic> {
    let mut topics: Vec<Topic> = collections
        .topics
        .values()
        .filter(|topic| topic_matches(topic, filter))
        .cloned()
        .collect();
    topics.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    topics
}

fn sorted_entries(collections: &Collections, topic_id: Option<Uuid>) -> Vec<Entry> {
    let mut entries: Vec<Entry> = collections
        .entries
        .values()
        .filter(|entry| topic_id.is_none_or(|id| entry.topic_id == id))
        .cloned()
        .collect();
    entries.sort_by(listing_order);
    entries
}

#[async_trait]
impl TopicRepository for MemoryStore {
    async fn insert(&self, draft: TopicDraft) -> Result<Topic, TopicRepositoryError> {
        let topic = Topic {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            is_active: true,
            created_at: Utc::now(),
        };
        let mut guard = self
            .inner
            .write()
            .map_err(|_| TopicRepositoryError::query(POISONED))?;
        guard.topics.insert(topic.id, topic.clone());
        Ok(topic)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Topic>, TopicRepositoryError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| TopicRepositoryError::query(POISONED))?;
        Ok(guard.topics.get(&id).cloned())
    }

    async fn set_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Option<Topic>, TopicRepositoryError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| TopicRepositoryError::query(POISONED))?;
        Ok(guard.topics.get_mut(&id).map(|topic| {
            topic.is_active = is_active;
            topic.clone()
        }))
    }

    async fn list(
        &self,
        filter: TopicFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Topic>, TopicRepositoryError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| TopicRepositoryError::query(POISONED))?;
        Ok(window(sorted_topics(&guard, filter), offset, limit))
    }

    async fn count(&self, filter: TopicFilter) -> Result<u64, TopicRepositoryError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| TopicRepositoryError::query(POISONED))?;
        let count = guard
            .topics
            .values()
            .filter(|topic| topic_matches(topic, filter))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn delete_with_entries(
        &self,
        id: Uuid,
    ) -> Result<CascadeOutcome, TopicRepositoryError> {
        // One write guard spans the whole batch: all-or-nothing.
        let mut guard = self
            .inner
            .write()
            .map_err(|_| TopicRepositoryError::query(POISONED))?;
        let topic_deleted = guard.topics.remove(&id).is_some();
        let before = guard.entries.len();
        guard.entries.retain(|_, entry| entry.topic_id != id);
        let entries_deleted = before.saturating_sub(guard.entries.len());
        Ok(CascadeOutcome {
            topic_deleted,
            entries_deleted: u64::try_from(entries_deleted).unwrap_or(u64::MAX),
        })
    }
}

#[async_trait]
impl EntryRepository for MemoryStore {
    async fn insert(&self, draft: EntryDraft) -> Result<Entry, EntryRepositoryError> {
        let entry = Entry {
            id: Uuid::new_v4(),
            topic_id: draft.topic_id,
            topic_name: draft.topic_name,
            telegram_username: draft.telegram_username,
            platform_username: draft.platform_username,
            wallet_address: draft.wallet_address,
            discord_username: draft.discord_username,
            email: draft.email,
            created_at: Utc::now(),
        };
        let mut guard = self
            .inner
            .write()
            .map_err(|_| EntryRepositoryError::query(POISONED))?;
        guard.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EntryRepositoryError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| EntryRepositoryError::query(POISONED))?;
        Ok(guard.entries.remove(&id).is_some())
    }

    async fn list_page(
        &self,
        topic_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Entry>, EntryRepositoryError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| EntryRepositoryError::query(POISONED))?;
        Ok(window(sorted_entries(&guard, topic_id), offset, limit))
    }

    async fn count(&self, topic_id: Option<Uuid>) -> Result<u64, EntryRepositoryError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| EntryRepositoryError::query(POISONED))?;
        let count = guard
            .entries
            .values()
            .filter(|entry| topic_id.is_none_or(|id| entry.topic_id == id))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn list_all(&self, topic_id: Option<Uuid>) -> Result<Vec<Entry>, EntryRepositoryError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| EntryRepositoryError::query(POISONED))?;
        Ok(sorted_entries(&guard, topic_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::{
        Email, PlatformUsername, TelegramPolicy, TelegramUsername, TopicDescription, TopicName,
    };
    use crate::domain::wallet::WalletAddress;

    fn topic_draft(name: &str) -> TopicDraft {
        TopicDraft {
            name: TopicName::new(name).expect("valid name"),
            description: TopicDescription::new("description").expect("valid description"),
        }
    }

    fn entry_draft(topic_id: Uuid, topic_name: &str, seq: u32) -> EntryDraft {
        EntryDraft {
            topic_id,
            topic_name: topic_name.to_owned(),
            telegram_username: TelegramUsername::new(
                format!("user_{seq}"),
                TelegramPolicy::Lenient,
            )
            .expect("valid telegram username"),
            platform_username: PlatformUsername::new(format!("user{seq}"))
                .expect("valid platform username"),
            wallet_address: WalletAddress::new(format!("0x{:040x}", seq))
                .expect("valid wallet"),
            discord_username: None,
            email: Email::new(format!("user{seq}@example.com")).expect("valid email"),
        }
    }

    #[tokio::test]
    async fn inserted_topics_start_active() {
        let store = MemoryStore::new();
        let topic = TopicRepository::insert(&store, topic_draft("Launch Week"))
            .await
            .expect("inserted");
        assert!(topic.is_active);
        let found = store.find_by_id(topic.id).await.expect("query succeeds");
        assert_eq!(found, Some(topic));
    }

    #[tokio::test]
    async fn active_filter_hides_paused_topics() {
        let store = MemoryStore::new();
        let kept = TopicRepository::insert(&store, topic_draft("Active"))
            .await
            .expect("inserted");
        let paused = TopicRepository::insert(&store, topic_draft("Paused"))
            .await
            .expect("inserted");
        store
            .set_active(paused.id, false)
            .await
            .expect("update succeeds");

        assert_eq!(
            TopicRepository::count(&store, TopicFilter::Active)
                .await
                .expect("count"),
            1
        );
        assert_eq!(
            TopicRepository::count(&store, TopicFilter::All)
                .await
                .expect("count"),
            2
        );
        let active = store
            .list(TopicFilter::Active, 0, 10)
            .await
            .expect("listing");
        assert_eq!(active.iter().map(|t| t.id).collect::<Vec<_>>(), vec![kept.id]);
    }

    #[tokio::test]
    async fn entry_listing_is_ordered_and_stable() {
        let store = MemoryStore::new();
        let topic_id = Uuid::new_v4();
        for seq in 0..5 {
            EntryRepository::insert(&store, entry_draft(topic_id, "Launch Week", seq))
                .await
                .expect("inserted");
        }

        let first = store.list_all(None).await.expect("listing");
        let second = store.list_all(None).await.expect("listing");
        assert_eq!(first, second, "ordering must be reproducible");
        assert!(
            first
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at),
            "newest first"
        );
    }

    #[tokio::test]
    async fn paging_is_a_window_over_the_ordered_set() {
        let store = MemoryStore::new();
        let topic_id = Uuid::new_v4();
        for seq in 0..25 {
            EntryRepository::insert(&store, entry_draft(topic_id, "Launch Week", seq))
                .await
                .expect("inserted");
        }

        assert_eq!(EntryRepository::count(&store, Some(topic_id)).await.expect("count"), 25);
        let last_page = store
            .list_page(Some(topic_id), 20, 10)
            .await
            .expect("listing");
        assert_eq!(last_page.len(), 5);
        let beyond = store.list_page(Some(topic_id), 30, 10).await.expect("listing");
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn cascade_removes_topic_and_only_its_entries() {
        let store = MemoryStore::new();
        let doomed = TopicRepository::insert(&store, topic_draft("Doomed"))
            .await
            .expect("inserted");
        let kept = TopicRepository::insert(&store, topic_draft("Kept"))
            .await
            .expect("inserted");
        for seq in 0..3 {
            EntryRepository::insert(&store, entry_draft(doomed.id, "Doomed", seq))
                .await
                .expect("inserted");
        }
        EntryRepository::insert(&store, entry_draft(kept.id, "Kept", 99))
            .await
            .expect("inserted");

        let outcome = store
            .delete_with_entries(doomed.id)
            .await
            .expect("cascade succeeds");
        assert!(outcome.topic_deleted);
        assert_eq!(outcome.entries_deleted, 3);
        assert_eq!(store.find_by_id(doomed.id).await.expect("query"), None);
        assert!(
            store
                .list_all(Some(doomed.id))
                .await
                .expect("listing")
                .is_empty()
        );
        assert_eq!(store.list_all(Some(kept.id)).await.expect("listing").len(), 1);
    }

    #[tokio::test]
    async fn cascade_on_missing_topic_is_a_no_op() {
        let store = MemoryStore::new();
        let outcome = store
            .delete_with_entries(Uuid::new_v4())
            .await
            .expect("no-op succeeds");
        assert!(!outcome.topic_deleted);
        assert_eq!(outcome.entries_deleted, 0);
    }
}
