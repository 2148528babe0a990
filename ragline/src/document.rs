//! Data types for documents, chunks, retrieval results, and answers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A source document containing text content and an origin label.
///
/// Documents are immutable ingestion input. They are not stored beyond the
/// ingestion call; only the [`Chunk`]s derived from them are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Opaque label naming the source this document came from.
    pub source_label: String,
    /// Key-value metadata associated with the document.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with empty metadata.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source_label: source_label.into(),
            metadata: HashMap::new(),
        }
    }
}

/// A bounded segment of a [`Document`], optionally carrying its embedding.
///
/// Chunk IDs are `{document_id}_{ordinal}`. The first `chunk_overlap`
/// characters of each chunk (except the first of a document) repeat the
/// last `chunk_overlap` characters of its predecessor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk, at most `chunk_size` characters.
    pub text: String,
    /// Position of this chunk within its parent document, starting at 0.
    pub ordinal: usize,
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// The vector embedding for this chunk's text. Empty until embedded.
    pub embedding: Vec<f32>,
    /// Metadata inherited from the parent document plus chunk fields.
    pub metadata: HashMap<String, String>,
}

/// A retrieved [`Chunk`] paired with a relevance score in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Normalized similarity score (higher is more relevant).
    pub score: f32,
}

/// A truncated excerpt of a retrieved chunk, returned with an [`Answer`].
///
/// Previews are verbatim substrings of stored chunk text, truncated at a
/// word boundary to the configured preview length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcePreview {
    /// Excerpt of the source chunk used for the answer.
    pub preview: String,
    /// Relevance score of this source in `[0, 1]`.
    pub relevance: f32,
}

/// A generated answer with its supporting source excerpts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The generated answer text.
    pub text: String,
    /// Source previews in descending relevance order.
    pub sources: Vec<SourcePreview>,
    /// Confidence in the answer, taken from the top retrieval score.
    /// Absent when nothing was retrieved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}
