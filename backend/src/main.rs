//! Backend entry-point: wires REST endpoints and OpenAPI docs.

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    if config.admin_token().is_none() {
        let allow_dev = std::env::var("SUBMIT_ALLOW_OPEN_ADMIN").ok().as_deref() == Some("1");
        if cfg!(debug_assertions) || allow_dev {
            warn!("SUBMIT_ADMIN_TOKEN unset; admin endpoints are open (dev only)");
        } else {
            return Err(std::io::Error::other(
                "SUBMIT_ADMIN_TOKEN must be set (or SUBMIT_ALLOW_OPEN_ADMIN=1 for development)",
            ));
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
