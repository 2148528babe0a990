//! Embedding capability trait for converting text to vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A capability that converts text into fixed-dimension vectors.
///
/// Implementations wrap specific embedding backends behind a unified
/// async interface. The default [`embed_batch`](Embedder::embed_batch)
/// implementation calls [`embed`](Embedder::embed) sequentially; backends
/// that support native batching should override it. Batch output always
/// preserves input order and length; an adapter that cannot guarantee
/// this must fail with [`RagError::ExternalService`](crate::RagError).
///
/// The gateway is a pure adapter: no caching and no retries of its own.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::Embedder;
///
/// let embedding = embedder.embed("hello world").await?;
/// assert_eq!(embedding.len(), embedder.dimensions());
/// ```
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs, in input
    /// order.
    ///
    /// The default implementation calls [`embed`](Embedder::embed)
    /// sequentially for each input. Override this method if the backend
    /// supports native batch embedding for better throughput.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of vectors produced by this embedder.
    fn dimensions(&self) -> usize;
}
