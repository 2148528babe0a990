//! Top-K retrieval over the active index.

use std::sync::Arc;

use tracing::debug;

use crate::document::ScoredChunk;
use crate::error::Result;
use crate::index::Index;

/// Retrieves the most relevant chunks for a query vector.
///
/// Delegates to [`Index::search`]; its only added responsibility is
/// bounding `k`. A caller-supplied `k` outside `[1, max_k]` is clamped
/// into range rather than rejected.
pub struct Retriever {
    index: Arc<Index>,
    default_k: usize,
    max_k: usize,
}

impl Retriever {
    /// Create a retriever with a default and maximum `k`.
    pub fn new(index: Arc<Index>, default_k: usize, max_k: usize) -> Self {
        Self { index, default_k, max_k }
    }

    /// Retrieve the top chunks for the query vector.
    ///
    /// `k` defaults to the configured value when `None` and is clamped
    /// into `[1, max_k]` otherwise.
    pub async fn retrieve(
        &self,
        query_embedding: &[f32],
        k: Option<usize>,
    ) -> Result<Vec<ScoredChunk>> {
        let requested = k.unwrap_or(self.default_k);
        let k = requested.clamp(1, self.max_k);
        if k != requested {
            debug!(requested, clamped = k, "retrieval k clamped into bounds");
        }
        self.index.search(query_embedding, k).await
    }
}
