//! Hosted model client — sentence similarity and token classification over the
//! Hugging Face Inference API (or any server speaking the same JSON shapes).
//!
//! Retries on 429, 503 (model still loading) and other 5xx with exponential backoff.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::{EntityExtractor, EntityMap, InferenceError, SimilarityScorer};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    inputs: SimilarityInputs<'a>,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct SimilarityInputs<'a> {
    source_sentence: &'a str,
    sentences: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct TokenClassificationRequest<'a> {
    inputs: &'a str,
    parameters: TokenClassificationParameters,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct TokenClassificationParameters {
    aggregation_strategy: &'static str,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            wait_for_model: true,
        }
    }
}

/// One aggregated entity span as returned by a token-classification model.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntity {
    pub entity_group: String,
    pub word: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Thin HTTP client shared by the remote similarity scorer and entity extractor.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl InferenceClient {
    pub fn new(base_url: String, api_token: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .context("Failed to build inference HTTP client")?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    /// POSTs `body` to the model endpoint and deserializes the JSON reply.
    pub async fn call<B, T>(&self, model: &str, body: &B) -> Result<T, InferenceError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.model_url(model);
        let mut last_error: Option<InferenceError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Inference call to {} failed (attempt {}), retrying after {}ms",
                    model,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_token)
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(InferenceError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Inference API returned {}: {}", status, body);
                last_error = Some(InferenceError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorBody>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(InferenceError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let bytes = response.bytes().await?;
            debug!("Inference call to {} succeeded ({} bytes)", model, bytes.len());
            return serde_json::from_slice(&bytes).map_err(InferenceError::Parse);
        }

        Err(last_error.unwrap_or(InferenceError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

/// Sentence-embedding similarity via the `sentence-similarity` task.
pub struct RemoteSimilarityScorer {
    client: InferenceClient,
    model: String,
}

impl RemoteSimilarityScorer {
    pub fn new(client: InferenceClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl SimilarityScorer for RemoteSimilarityScorer {
    async fn similarity(&self, a: &str, b: &str) -> Result<f32, InferenceError> {
        let request = SimilarityRequest {
            inputs: SimilarityInputs {
                source_sentence: a,
                sentences: [b],
            },
            options: RequestOptions::default(),
        };
        let scores: Vec<f32> = self.client.call(&self.model, &request).await?;
        first_score(&scores)
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

fn first_score(scores: &[f32]) -> Result<f32, InferenceError> {
    scores
        .first()
        .map(|s| s.clamp(-1.0, 1.0))
        .ok_or(InferenceError::EmptyResponse)
}

/// Named-entity recognition via the `token-classification` task with simple aggregation.
pub struct RemoteEntityExtractor {
    client: InferenceClient,
    model: String,
}

impl RemoteEntityExtractor {
    pub fn new(client: InferenceClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl EntityExtractor for RemoteEntityExtractor {
    async fn extract_entities(&self, text: &str) -> Result<EntityMap, InferenceError> {
        let request = TokenClassificationRequest {
            inputs: text,
            parameters: TokenClassificationParameters {
                aggregation_strategy: "simple",
            },
            options: RequestOptions::default(),
        };
        let spans: Vec<TokenEntity> = self.client.call(&self.model, &request).await?;
        Ok(group_entities(spans))
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

/// Groups aggregated spans by label, deduplicating surface strings.
pub fn group_entities(spans: impl IntoIterator<Item = TokenEntity>) -> EntityMap {
    let mut entities = EntityMap::new();
    for span in spans {
        entities
            .entry(span.entity_group)
            .or_default()
            .insert(span.word);
    }
    entities
}
