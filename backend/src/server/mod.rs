//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use portal::ApiDoc;
use portal::inbound::http::bookings::create_booking;
use portal::inbound::http::error::json_config;
use portal::inbound::http::health::{HealthState, live, ready};
use portal::inbound::http::pages;
use portal::inbound::http::quotes::quote_booking;
use portal::inbound::http::session::{check_access, current_session, get_navigation};
use portal::inbound::http::state::{HttpState, HttpStatePorts};
use portal::middleware::{RoleGuard, Trace};
use portal::outbound::marketplace::{
    HttpBookingGateway, HttpDashboardSource, HttpSessionSource, MarketplaceClient,
};

/// Wire the marketplace adapters into handler state.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let client = MarketplaceClient::new(config.api_base_url.clone(), config.request_timeout)
        .map_err(|e| std::io::Error::other(format!("marketplace client setup failed: {e}")))?;
    let ports = HttpStatePorts {
        sessions: Arc::new(HttpSessionSource::new(client.clone())),
        bookings: Arc::new(HttpBookingGateway::new(client.clone())),
        dashboards: Arc::new(HttpDashboardSource::new(client)),
    };
    Ok(HttpState::new(ports, Arc::new(DefaultClock)))
}

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
        .service(current_session)
        .service(check_access)
        .service(get_navigation)
        .service(quote_booking)
        .service(create_booking);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Registered last: the empty-prefix scope matches every remaining path.
    app.service(web::scope("").wrap(RoleGuard).configure(pages::configure))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the marketplace client,
/// binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(config)?);
    info!(
        bind_addr = %config.bind_addr(),
        api_base_url = %config.api_base_url(),
        "starting portal gateway"
    );

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
