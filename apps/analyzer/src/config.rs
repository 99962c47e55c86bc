use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_INFERENCE_API_URL: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_SIMILARITY_MODEL: &str = "sentence-transformers/stsb-roberta-large";
const DEFAULT_NER_MODEL: &str = "dslim/bert-base-NER";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which implementation backs the similarity scorer and entity extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceBackend {
    /// Hosted sentence-embedding and NER models over HTTP.
    Remote,
    /// In-process lexical approximations. No network access.
    Lexical,
}

impl FromStr for InferenceBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(InferenceBackend::Remote),
            "lexical" | "local" => Ok(InferenceBackend::Lexical),
            other => bail!("INFERENCE_BACKEND must be 'remote' or 'lexical', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub inference_backend: InferenceBackend,
    pub inference_api_url: String,
    pub inference_api_token: Option<String>,
    pub similarity_model: String,
    pub ner_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let inference_backend: InferenceBackend = env_or("INFERENCE_BACKEND", "lexical").parse()?;
        let inference_api_token = std::env::var("INFERENCE_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        if inference_backend == InferenceBackend::Remote && inference_api_token.is_none() {
            bail!("INFERENCE_API_TOKEN is required when INFERENCE_BACKEND=remote");
        }

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "static/uploads")),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            inference_backend,
            inference_api_url: env_or("INFERENCE_API_URL", DEFAULT_INFERENCE_API_URL),
            inference_api_token,
            similarity_model: env_or("SIMILARITY_MODEL", DEFAULT_SIMILARITY_MODEL),
            ner_model: env_or("NER_MODEL", DEFAULT_NER_MODEL),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            upload_dir: PathBuf::from("static/uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            inference_backend: InferenceBackend::Lexical,
            inference_api_url: DEFAULT_INFERENCE_API_URL.to_string(),
            inference_api_token: None,
            similarity_model: DEFAULT_SIMILARITY_MODEL.to_string(),
            ner_model: DEFAULT_NER_MODEL.to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
