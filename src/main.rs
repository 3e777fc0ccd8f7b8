use std::sync::Arc;

use portfolio_site::{app, config, mailer, service::ContactService};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded contact relay config");

    // Setup mail transport and service
    let mailer = mailer::from_config(&cfg.transport).unwrap_or_else(|e| {
        tracing::error!("Failed to set up mail transport: {e}");
        panic!("failed to set up mail transport: {e}");
    });
    let service = Arc::new(ContactService::from_config(&cfg, mailer));
    tracing::info!("Contact messages are delivered to {}", service.recipient());

    if let Some(site_dir) = &cfg.site_dir {
        tracing::info!("Serving static site from {}", site_dir.display());
    }

    // Setup router
    let router = app(service, &cfg);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener
        .local_addr()
        .expect("Failed to read listener address");

    tracing::info!(
        "Contact relay starting, listening on {} (relay path {})",
        addr,
        cfg.relay_path
    );

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
