//! Inference backends — the sentence-similarity and named-entity models the analyzer consults.
//!
//! Both models sit behind traits so the handler never knows whether it is talking to a
//! hosted model or the in-process lexical approximation. The backends are built once at
//! startup and shared read-only through `AppState`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, InferenceBackend};

pub mod lexical;
pub mod remote;

/// Entity label whose surface strings are treated as resume skills.
pub const SKILL_LABEL: &str = "SKILL";

/// Entity label → distinct surface strings.
pub type EntityMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model unavailable after {retries} retries")]
    Unavailable { retries: u32 },

    #[error("Model returned an empty response")]
    EmptyResponse,
}

/// Cosine similarity between the embeddings of two texts, in [-1, 1].
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    async fn similarity(&self, a: &str, b: &str) -> Result<f32, InferenceError>;

    /// Short backend label for logs: "remote" | "lexical".
    fn backend(&self) -> &'static str;
}

/// Named-entity extraction grouped by label.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract_entities(&self, text: &str) -> Result<EntityMap, InferenceError>;

    fn backend(&self) -> &'static str;
}

/// The pair of model backends selected by configuration.
#[derive(Clone)]
pub struct ModelBackends {
    pub similarity: Arc<dyn SimilarityScorer>,
    pub entities: Arc<dyn EntityExtractor>,
}

impl ModelBackends {
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.inference_backend {
            InferenceBackend::Lexical => Ok(Self {
                similarity: Arc::new(lexical::LexicalSimilarity),
                entities: Arc::new(lexical::GazetteerEntityExtractor),
            }),
            InferenceBackend::Remote => {
                let token = config
                    .inference_api_token
                    .clone()
                    .context("INFERENCE_API_TOKEN is required for the remote backend")?;
                let client = remote::InferenceClient::new(config.inference_api_url.clone(), token)?;
                Ok(Self {
                    similarity: Arc::new(remote::RemoteSimilarityScorer::new(
                        client.clone(),
                        config.similarity_model.clone(),
                    )),
                    entities: Arc::new(remote::RemoteEntityExtractor::new(
                        client,
                        config.ner_model.clone(),
                    )),
                })
            }
        }
    }
}
