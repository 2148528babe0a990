//! The active-collection index: embed on add, similarity search, reset.

use std::sync::Arc;

use tracing::{debug, info};

use crate::document::{Chunk, ScoredChunk};
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Owns one named collection in a [`VectorStore`] and the [`Embedder`]
/// used to vectorize chunks on the way in.
///
/// Insertion order is irrelevant to search correctness; each add is
/// independent and commutative. [`reset`](Index::reset) is atomic from
/// the caller's perspective and idempotent.
pub struct Index {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    collection: String,
}

impl Index {
    /// Create an index over the named collection.
    ///
    /// The collection itself is created by
    /// [`ensure_collection`](Index::ensure_collection).
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        collection: impl Into<String>,
    ) -> Self {
        Self { embedder, store, collection: collection.into() }
    }

    /// The name of the active collection.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Create the active collection in the store if it does not exist.
    pub async fn ensure_collection(&self) -> Result<()> {
        self.store.create_collection(&self.collection, self.embedder.dimensions()).await
    }

    /// Embed the given chunks and store them in the active collection.
    ///
    /// Texts are embedded in one batch through the gateway. Returns the
    /// number of chunks stored.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ExternalService`] if embedding or storage
    /// fails, or if the gateway returns a different number of vectors
    /// than texts submitted.
    pub async fn add(&self, mut chunks: Vec<Chunk>) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != texts.len() {
            return Err(RagError::external(
                "embedding",
                format!("expected {} vectors, got {}", texts.len(), embeddings.len()),
            ));
        }

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        self.store.upsert(&self.collection, &chunks).await?;
        debug!(collection = %self.collection, count = chunks.len(), "chunks indexed");
        Ok(chunks.len())
    }

    /// Return the `k` highest-scoring chunks for the query vector.
    ///
    /// Result length never exceeds `min(k, stored)`; scores are strictly
    /// non-increasing with ties broken most-recently-inserted-first.
    pub async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        self.store.search(&self.collection, embedding, k).await
    }

    /// Atomically discard every chunk in the active collection.
    ///
    /// The collection remains queryable (empty result set) afterwards.
    /// Resetting an empty collection is a no-op success.
    pub async fn reset(&self) -> Result<()> {
        self.store.reset_collection(&self.collection).await?;
        info!(collection = %self.collection, "collection reset");
        Ok(())
    }

    /// Number of chunks currently stored in the active collection.
    pub async fn count(&self) -> Result<usize> {
        self.store.count(&self.collection).await
    }
}
