mod analysis;
mod config;
mod errors;
mod extraction;
mod inference;
mod render;
mod routes;
mod state;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::Analyzer;
use crate::config::Config;
use crate::extraction::PdfTextExtractor;
use crate::inference::ModelBackends;
use crate::render::Templates;
use crate::routes::build_router;
use crate::state::AppState;
use crate::upload::UploadStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Upload directory
    let uploads = UploadStore::new(&config.upload_dir);
    uploads.ensure_dir().await?;
    info!("Uploads stored in {}", uploads.dir().display());

    // Model backends, loaded once and shared by every request
    let models = ModelBackends::from_config(&config)?;
    info!(
        "Inference backend: {:?} (similarity: {}, entities: {})",
        config.inference_backend,
        models.similarity.backend(),
        models.entities.backend()
    );

    let analyzer = Arc::new(Analyzer::new(Arc::new(PdfTextExtractor), models));
    let templates = Arc::new(Templates::new()?);

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer,
        uploads,
        templates,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
