//! Groq generation adapter over the Groq chat-completions API.
//!
//! This module is only available when the `groq` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{RagError, Result};
use crate::generation::Generator;

/// The Groq chat-completions endpoint (OpenAI-compatible).
const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// The default Groq model.
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Capability name carried in errors from this adapter.
const SERVICE: &str = "generation";

/// A [`Generator`] backed by the Groq chat-completions API.
///
/// The containment instruction and the retrieval context travel in the
/// system message; the question is the user message. Temperature defaults
/// to 0.0 so answers stay anchored to the supplied context.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::groq::GroqGenerator;
///
/// let generator = GroqGenerator::new("gsk_...")?;
/// ```
pub struct GroqGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GroqGenerator {
    /// Create a new generator with the given API key.
    ///
    /// Uses the default model (`llama-3.3-70b-versatile`) at temperature
    /// 0.0.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Validation("Groq API key must not be empty".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.into(),
            temperature: 0.0,
        })
    }

    /// Create a new generator using the `GROQ_API_KEY` environment
    /// variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            RagError::Validation("GROQ_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

// ── Groq API request/response types ────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── Generator implementation ───────────────────────────────────────

#[async_trait]
impl Generator for GroqGenerator {
    async fn complete(
        &self,
        system_instruction: &str,
        context: &str,
        question: &str,
    ) -> Result<String> {
        debug!(provider = "Groq", model = %self.model, context_len = context.len(), "completion request");

        let system = format!("{system_instruction}\n\nContext:\n{context}");
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: &system },
                ChatMessage { role: "user", content: question },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(GROQ_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Groq", error = %e, "request failed");
                RagError::external(SERVICE, format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = "Groq", %status, "API error");
            return Err(RagError::external(SERVICE, format!("API returned {status}: {detail}")));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = "Groq", error = %e, "failed to parse response");
            RagError::external(SERVICE, format!("failed to parse response: {e}"))
        })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RagError::external(SERVICE, "API returned no choices"))
    }
}
