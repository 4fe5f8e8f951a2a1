//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::Trace;
use crate::domain::ports::{
    AdminAuthorizer, EntriesCommand, EntriesQuery, FixtureAdminAuthorizer,
    FixturePlatformUsernameVerifier, PlatformUsernameVerifier,
};
use crate::domain::{EntryService, TopicService};
use crate::inbound::http::entries::{delete_entry, export_entries, list_entries, submit_entry};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::topics::{create_topic, delete_topic, list_topics, update_topic};
use crate::outbound::{HttpUsernameVerifier, MemoryStore, StaticTokenAuthorizer};

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .app_data(http_state)
        .service(list_entries)
        .service(submit_entry)
        .service(delete_entry)
        .service(export_entries)
        .service(list_topics)
        .service(create_topic)
        .service(update_topic)
        .service(delete_topic);

    let app = App::new()
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build the entry services with the configured verifier, falling back
/// to the fixture that approves every username when no endpoint is set.
fn build_entry_services(
    store: &Arc<MemoryStore>,
    config: &ServerConfig,
) -> std::io::Result<(Arc<dyn EntriesQuery>, Arc<dyn EntriesCommand>)> {
    fn split<V>(
        service: EntryService<MemoryStore, MemoryStore, V>,
    ) -> (Arc<dyn EntriesQuery>, Arc<dyn EntriesCommand>)
    where
        V: PlatformUsernameVerifier + 'static,
    {
        let service = Arc::new(service);
        let query: Arc<dyn EntriesQuery> = service.clone();
        let command: Arc<dyn EntriesCommand> = service;
        (query, command)
    }

    match &config.verifier_url {
        Some(url) => {
            let verifier = HttpUsernameVerifier::new(url.clone(), config.verifier_timeout)
                .map_err(|error| {
                    std::io::Error::other(format!("verifier client construction failed: {error}"))
                })?;
            Ok(split(EntryService::new(
                Arc::clone(store),
                Arc::clone(store),
                Arc::new(verifier),
                config.telegram_policy,
                config.uniqueness_scope,
            )))
        }
        None => {
            warn!("no verifier endpoint configured; approving every platform username");
            Ok(split(EntryService::new(
                Arc::clone(store),
                Arc::clone(store),
                Arc::new(FixturePlatformUsernameVerifier),
                config.telegram_policy,
                config.uniqueness_scope,
            )))
        }
    }
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when an outbound client cannot be
/// constructed or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let store = Arc::new(MemoryStore::new());
    let topic_service = Arc::new(TopicService::new(Arc::clone(&store)));
    let (entries_query, entries) = build_entry_services(&store, &config)?;
    let authorizer: Arc<dyn AdminAuthorizer> = match &config.admin_token {
        Some(token) => Arc::new(StaticTokenAuthorizer::new(token.clone())),
        None => {
            warn!("no admin token configured; admin endpoints are open (dev only)");
            Arc::new(FixtureAdminAuthorizer)
        }
    };

    let http_state = web::Data::new(HttpState {
        topics_query: topic_service.clone(),
        topics: topic_service,
        entries_query,
        entries,
        authorizer,
    });

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
