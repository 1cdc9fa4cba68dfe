mod config;
mod errors;
mod extract;
mod learning;
mod llm_client;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::learning::service::LearningService;
use crate::llm_client::AzureOpenAiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "learning_api={level},tower_http={level}",
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Learning API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app_env
    );

    // Initialize completion client
    let llm = AzureOpenAiClient::new(&config.azure_openai)?;
    info!(
        "Completion client initialized (deployment: {}, timeout: {:?})",
        llm.deployment(),
        config.azure_openai.timeout
    );

    let mut learning = LearningService::new(Arc::new(llm), config.max_tokens);
    if config.is_development() {
        info!("Debug artifacts enabled in {}", config.debug_artifact_dir);
        learning = learning.with_debug_artifacts(&config.debug_artifact_dir);
    }

    let state = AppState {
        learning: Arc::new(learning),
        expose_error_detail: config.is_development(),
        started_at: Instant::now(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.allowed_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// CORS restricted to the configured origins, with credentials.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
