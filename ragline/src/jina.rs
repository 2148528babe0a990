//! Jina embedding adapter over the Jina embeddings HTTP API.
//!
//! This module is only available when the `jina` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::Embedder;
use crate::error::{RagError, Result};

/// The Jina embeddings API endpoint.
const JINA_EMBEDDINGS_URL: &str = "https://api.jina.ai/v1/embeddings";

/// The default Jina embedding model.
const DEFAULT_MODEL: &str = "jina-embeddings-v2-base-en";

/// The dimensionality of `jina-embeddings-v2-base-en`.
const DEFAULT_DIMENSIONS: usize = 768;

/// Capability name carried in errors from this adapter.
const SERVICE: &str = "embedding";

/// An [`Embedder`] backed by the Jina embeddings API.
///
/// Uses `reqwest` to call the `/v1/embeddings` endpoint directly.
///
/// # Configuration
///
/// - `model` - defaults to `jina-embeddings-v2-base-en`.
/// - `api_key` - from the constructor or the `JINA_API_KEY` environment
///   variable.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::jina::JinaEmbedder;
///
/// let embedder = JinaEmbedder::new("jina_...")?;
/// let embedding = embedder.embed("hello world").await?;
/// ```
pub struct JinaEmbedder {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl JinaEmbedder {
    /// Create a new embedder with the given API key.
    ///
    /// Uses the default model (`jina-embeddings-v2-base-en`, 768
    /// dimensions).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Validation("Jina API key must not be empty".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new embedder using the `JINA_API_KEY` environment
    /// variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("JINA_API_KEY").map_err(|_| {
            RagError::Validation("JINA_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Set the model name and its output dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

// ── Jina API request/response types ────────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    detail: String,
}

// ── Embedder implementation ────────────────────────────────────────

#[async_trait]
impl Embedder for JinaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Jina", text_len = text.len(), "embedding single text");

        let results = self.embed_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| RagError::external(SERVICE, "API returned empty response"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "Jina", batch_size = texts.len(), model = %self.model, "embedding batch");

        let request_body = EmbeddingRequest { model: &self.model, input: texts.to_vec() };

        let response = self
            .client
            .post(JINA_EMBEDDINGS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Jina", error = %e, "request failed");
                RagError::external(SERVICE, format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.detail).unwrap_or(body);

            error!(provider = "Jina", %status, "API error");
            return Err(RagError::external(SERVICE, format!("API returned {status}: {detail}")));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = "Jina", error = %e, "failed to parse response");
            RagError::external(SERVICE, format!("failed to parse response: {e}"))
        })?;

        if embedding_response.data.len() != texts.len() {
            return Err(RagError::external(
                SERVICE,
                format!(
                    "expected {} vectors, got {}",
                    texts.len(),
                    embedding_response.data.len()
                ),
            ));
        }

        Ok(embedding_response.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
