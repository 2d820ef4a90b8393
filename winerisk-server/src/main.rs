//! Wine Quality Risk Server
//!
//! Inference-only API over the pretrained risk classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                 WINERISK SERVER                    │
//! ├────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌─────────────────────────────┐  │
//! │  │  API      │   │  winerisk-core              │  │
//! │  │  (Axum)   │──▶│  schema / ONNX / threshold  │  │
//! │  └───────────┘   └─────────────────────────────┘  │
//! │                        ▲                           │
//! │                        │ loaded once at startup    │
//! │                  ┌─────┴──────┐                    │
//! │                  │  models/   │                    │
//! │                  └────────────┘                    │
//! └────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winerisk_core::ArtifactStore;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "winerisk_server=debug,winerisk_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Wine Risk Server starting...");
    tracing::info!("Models dir: {}", config.models_dir);

    // Load artifacts once; a missing artifact halts startup
    let artifacts = match winerisk_core::load_global(Path::new(&config.models_dir)) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Artifact load failed: {}", e);
            eprintln!("Model artifacts not found. Please check your /models folder.");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Classifier ready: {} (threshold {})",
        artifacts.metadata().model_path,
        artifacts.threshold()
    );

    // Build application state
    let state = AppState {
        artifacts,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/model", get(handlers::model_info::status))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
