pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod service;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use std::sync::Arc;

use config::Config;
use handlers::rest;
use service::ContactService;

/// Builds the HTTP router: the relay endpoint, health check, API document and
/// the static site when a site directory is configured.
pub fn app(service: Arc<ContactService>, config: &Config) -> Router {
    let router = Router::new()
        .route(
            &config.relay_path,
            post(rest::submit_contact).fallback(rest::method_not_allowed),
        )
        .route("/health", get(rest::health_check))
        .with_state(service)
        .merge(
            Router::new()
                .route("/api-doc/openapi.json", get(rest::openapi))
                .with_state(Arc::new(rest::api_doc(&config.relay_path))),
        );

    let router = match &config.site_dir {
        Some(site_dir) => router.fallback_service(ServeDir::new(site_dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}
