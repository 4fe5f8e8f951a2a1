//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the
//! shared error schema, and the admin bearer security scheme. The
//! generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::entries::{
    DeleteEntryBody, EntryBody, ListEntriesResponse, SubmitEntryBody,
};
use crate::inbound::http::topics::{
    CreateTopicBody, DeleteTopicBody, DeleteTopicResponse, ListTopicsResponse, TopicBody,
    UpdateTopicBody,
};

/// Enrich the generated document with the admin bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AdminBearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Topic submissions API",
        description = "Per-topic entry collection, curation, and export."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::entries::list_entries,
        crate::inbound::http::entries::submit_entry,
        crate::inbound::http::entries::delete_entry,
        crate::inbound::http::entries::export_entries,
        crate::inbound::http::topics::list_topics,
        crate::inbound::http::topics::create_topic,
        crate::inbound::http::topics::update_topic,
        crate::inbound::http::topics::delete_topic,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        EntryBody,
        ListEntriesResponse,
        SubmitEntryBody,
        DeleteEntryBody,
        TopicBody,
        ListTopicsResponse,
        CreateTopicBody,
        UpdateTopicBody,
        DeleteTopicBody,
        DeleteTopicResponse,
    )),
    tags(
        (name = "entries", description = "Entry submission, listing, and export"),
        (name = "topics", description = "Topic administration"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;
