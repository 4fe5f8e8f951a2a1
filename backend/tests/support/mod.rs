//! Shared harness for HTTP integration tests.
//!
//! Builds the real API surface over the in-memory store so tests
//! exercise full request flows without any external collaborator. Topics
//! are seeded through the driving port; the HTTP creation path has its
//! own coverage in the topics suite.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::{Value, json};

use backend::domain::ports::{NewTopic, PlatformUsernameVerifier};
use backend::domain::{EntryService, TelegramPolicy, TopicService, UniquenessScope};
use backend::inbound::http::entries::{delete_entry, export_entries, list_entries, submit_entry};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::topics::{create_topic, delete_topic, list_topics, update_topic};
use backend::outbound::{MemoryStore, StaticTokenAuthorizer};

/// Credential accepted by the test authorizer.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Build handler state over a fresh store with the given knobs.
pub fn state_with<V>(
    verifier: V,
    policy: TelegramPolicy,
    scope: UniquenessScope,
) -> web::Data<HttpState>
where
    V: PlatformUsernameVerifier + 'static,
{
    let store = Arc::new(MemoryStore::new());
    let topic_service = Arc::new(TopicService::new(Arc::clone(&store)));
    let entry_service = Arc::new(EntryService::new(
        Arc::clone(&store),
        store,
        Arc::new(verifier),
        policy,
        scope,
    ));
    web::Data::new(HttpState {
        topics_query: topic_service.clone(),
        topics: topic_service,
        entries_query: entry_service.clone(),
        entries: entry_service,
        authorizer: Arc::new(StaticTokenAuthorizer::new(ADMIN_TOKEN)),
    })
}

/// Default state: approving verifier, lenient Telegram, per-topic scope.
pub fn default_state() -> web::Data<HttpState> {
    state_with(
        backend::domain::ports::FixturePlatformUsernameVerifier,
        TelegramPolicy::Lenient,
        UniquenessScope::PerTopic,
    )
}

/// Assemble the API surface around prepared handler state.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().service(
        web::scope("/api/v1")
            .app_data(state)
            .service(list_entries)
            .service(submit_entry)
            .service(delete_entry)
            .service(export_entries)
            .service(list_topics)
            .service(create_topic)
            .service(update_topic)
            .service(delete_topic),
    )
}

/// Seed a topic through the driving port and return its id.
pub async fn seed_topic(state: &HttpState, name: &str) -> String {
    state
        .topics
        .create(NewTopic {
            name: name.to_owned(),
            description: format!("Submissions for {name}"),
        })
        .await
        .expect("seeded topic")
        .id
        .to_string()
}

/// Well-formed submission payload targeting `topic_id`, varied by `seq`.
pub fn entry_payload(topic_id: &str, seq: u32) -> Value {
    json!({
        "topicId": topic_id,
        "telegramUsername": format!("@user_{seq}"),
        "platformUsername": format!("user{seq}"),
        "walletAddress": format!("0x{seq:040x}"),
        "discordUsername": null,
        "email": format!("user{seq}@example.com"),
    })
}
