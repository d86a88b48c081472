// Main entry point for the OSINT assistant API server

use std::sync::Arc;

use anyhow::{Context, Result};
use osint_core::kernel::{BaseAI, OpenRouterAI, OpenRouterClient};
use osint_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,osint_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OSINT Framework API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let client = OpenRouterClient::new(config.client_config())
        .context("Failed to create OpenRouter client")?;
    let ai: Arc<dyn BaseAI> = Arc::new(OpenRouterAI::new(client));

    if ai.is_configured() {
        tracing::info!(model = ai.default_model(), "OpenRouter configured");
    } else {
        tracing::warn!("OPENROUTER_API_KEY not set - AI endpoints will return errors");
    }

    // Build application
    let app = build_app(ai);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
