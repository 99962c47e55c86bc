use std::sync::Arc;

use crate::analysis::pipeline::Analyzer;
use crate::config::Config;
use crate::render::Templates;
use crate::upload::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// PDF extractor and model backends, loaded once at startup and read-only afterwards.
    pub analyzer: Arc<Analyzer>,
    pub uploads: UploadStore,
    pub templates: Arc<Templates>,
}
