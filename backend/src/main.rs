//! Gateway entry-point: loads configuration, installs logging and runs the
//! HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portal::inbound::http::health::HealthState;
use portal::settings::PortalSettings;
use server::{ServerConfig, create_server};

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

    let settings = PortalSettings::load().map_err(|e| {
        error!(error = %e, "failed to load configuration");
        std::io::Error::other(format!("failed to load configuration: {e}"))
    })?;
    let config = ServerConfig::from_settings(&settings).map_err(|e| {
        error!(error = %e, "invalid configuration");
        std::io::Error::other(e.to_string())
    })?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
