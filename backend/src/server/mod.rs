//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::http_state_from_adapters;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{BrowserSession, CookieContentSecurity},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::auth::{login, logout, register};
use crate::inbound::http::dashboard::{DashboardRenderer, dashboard};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::stats::spend_stats;
use crate::inbound::http::subscriptions::{
    create_subscription, delete_subscription, list_subscriptions, update_subscription,
};
use crate::middleware::Trace;

const SESSION_COOKIE_NAME: &str = "session";

/// Everything a worker needs to build its [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub renderer: web::Data<DashboardRenderer>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Assemble routes, session handling, and tracing for one worker.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        renderer,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(BrowserSession::default())
        .build();

    let api = web::scope("/api")
        .service(register)
        .service(login)
        .service(logout)
        .service(list_subscriptions)
        .service(create_subscription)
        .service(update_subscription)
        .service(delete_subscription)
        .service(spend_stats);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(renderer)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(ready)
        .service(live)
        .service(api)
        .service(dashboard);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.wrap(session).wrap(Trace)
}

/// Construct the Actix HTTP server.
///
/// The returned [`Server`] must be awaited to drive the listener; callers
/// mark `health_state` ready once it is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the adapters cannot be built, the
/// dashboard template fails to compile, or the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let renderer = web::Data::new(DashboardRenderer::new().map_err(|err| {
        std::io::Error::other(format!("failed to compile dashboard template: {err}"))
    })?);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        store: _,
        build_mode: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
            renderer: renderer.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
