//! Vector store trait for storing and searching embedded chunks.

use async_trait::async_trait;

use crate::document::{Chunk, ScoredChunk};
use crate::error::Result;

/// A storage backend for embedded chunks with similarity search.
///
/// Implementations manage named collections of [`Chunk`]s. The similarity
/// metric is fixed per implementation and scores are normalized into
/// `[0, 1]` at this boundary.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.create_collection("docs", 384).await?;
/// store.upsert("docs", &chunks).await?;
/// let results = store.search("docs", &query_embedding, 5).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a named collection. No-op if it already exists.
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Atomically discard every chunk in a collection, leaving it empty
    /// and queryable.
    ///
    /// Must be idempotent: resetting an empty or missing collection is a
    /// successful no-op that leaves an empty collection behind. No caller
    /// may observe a half-reset collection.
    async fn reset_collection(&self, name: &str) -> Result<()>;

    /// Upsert chunks into a collection. Chunks must have embeddings set.
    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()>;

    /// Search for the `k` most similar chunks to the given embedding.
    ///
    /// Returns at most `min(k, stored)` results ordered by strictly
    /// non-increasing score, ties broken most-recently-inserted-first.
    async fn search(&self, collection: &str, embedding: &[f32], k: usize)
    -> Result<Vec<ScoredChunk>>;

    /// Number of chunks currently stored in a collection.
    async fn count(&self, collection: &str) -> Result<usize>;
}
