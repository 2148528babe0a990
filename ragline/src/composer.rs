//! Grounded answer composition.
//!
//! [`AnswerComposer`] turns retrieved chunks into a generation request
//! whose instruction confines the model to the supplied context, then
//! assembles the final [`Answer`] with source previews and a confidence
//! taken from the top retrieval score.

use std::sync::Arc;

use tracing::{debug, info};

use crate::document::{Answer, ScoredChunk, SourcePreview};
use crate::error::Result;
use crate::generation::Generator;

/// The fixed reply used when the retrieved context cannot answer the
/// question, or when nothing was retrieved at all.
pub const INSUFFICIENT_INFORMATION: &str =
    "I don't have enough information to answer that question.";

/// Instruction sent with every generation request. Containment is a
/// correctness property: the model must not answer from anything but the
/// supplied context.
const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant answering questions about \
     ingested documents. Answer the question based ONLY on the supplied context. If the \
     answer is not in the context, reply exactly: \
     \"I don't have enough information to answer that question.\"";

/// Composes a grounded [`Answer`] from retrieved chunks.
pub struct AnswerComposer {
    generator: Arc<dyn Generator>,
    preview_len: usize,
}

impl AnswerComposer {
    /// Create a composer producing previews of at most `preview_len`
    /// characters.
    pub fn new(generator: Arc<dyn Generator>, preview_len: usize) -> Self {
        Self { generator, preview_len }
    }

    /// Compose an answer for `question` from the retrieved chunks.
    ///
    /// With empty `retrieved` this returns the well-formed
    /// insufficient-information [`Answer`] (empty sources, no confidence)
    /// without calling the generation capability. Otherwise the chunks
    /// are assembled into the context in relevance order, and `sources`
    /// preserves that order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ExternalService`](crate::RagError) if the
    /// generation capability fails.
    pub async fn compose(&self, question: &str, retrieved: &[ScoredChunk]) -> Result<Answer> {
        if retrieved.is_empty() {
            debug!("no context retrieved, returning insufficient-information answer");
            return Ok(Answer {
                text: INSUFFICIENT_INFORMATION.to_string(),
                sources: Vec::new(),
                confidence: None,
            });
        }

        let context =
            retrieved.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n");

        let text = self.generator.complete(SYSTEM_INSTRUCTION, &context, question).await?;

        let sources: Vec<SourcePreview> = retrieved
            .iter()
            .map(|r| SourcePreview {
                preview: truncate_preview(&r.chunk.text, self.preview_len),
                relevance: r.score,
            })
            .collect();

        let confidence = retrieved.first().map(|r| r.score);

        info!(source_count = sources.len(), "answer composed");

        Ok(Answer { text, sources, confidence })
    }
}

/// Truncate chunk text to at most `max_len` characters, backing up to the
/// last word boundary so the preview stays a verbatim excerpt.
pub(crate) fn truncate_preview(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_len).collect();
    match cut.rfind(' ') {
        Some(pos) if pos > 0 => cut[..pos].trim_end().to_string(),
        _ => cut,
    }
}
