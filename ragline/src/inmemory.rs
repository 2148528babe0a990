//! In-memory vector store using cosine similarity.
//!
//! [`InMemoryVectorStore`] keeps collections in a `HashMap` behind a
//! `tokio::sync::RwLock`. Searches take the read lock; upserts and resets
//! take the write lock, so a reset swaps the whole collection in one
//! critical section and is never observable half-done. Suitable for
//! development, testing, and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, ScoredChunk};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// A stored chunk tagged with its insertion sequence number.
#[derive(Debug, Clone)]
struct StoredChunk {
    chunk: Chunk,
    seq: u64,
}

/// One named collection: chunk ID to stored entry, plus a monotonically
/// increasing insertion counter used for deterministic tie-breaking.
#[derive(Debug, Default)]
struct Collection {
    entries: HashMap<String, StoredChunk>,
    next_seq: u64,
}

/// An in-memory [`VectorStore`] using cosine similarity.
///
/// The similarity metric is cosine, fixed; raw cosine values are mapped
/// from `[-1, 1]` into `[0, 1]` so scores match the crate-wide relevance
/// scale. Equal scores order most-recently-inserted-first.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.create_collection("docs", 384).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Map a raw cosine value from `[-1, 1]` onto the `[0, 1]` relevance scale.
fn normalize_score(cosine: f32) -> f32 {
    ((cosine + 1.0) / 2.0).clamp(0.0, 1.0)
}

fn missing_collection(name: &str) -> RagError {
    RagError::external("vector-store", format!("collection '{name}' does not exist"))
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn reset_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.insert(name.to_string(), Collection::default());
        Ok(())
    }

    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store =
            collections.get_mut(collection).ok_or_else(|| missing_collection(collection))?;
        for chunk in chunks {
            let seq = store.next_seq;
            store.next_seq += 1;
            store.entries.insert(chunk.id.clone(), StoredChunk { chunk: chunk.clone(), seq });
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| missing_collection(collection))?;

        let mut scored: Vec<(ScoredChunk, u64)> = store
            .entries
            .values()
            .map(|entry| {
                let score = normalize_score(cosine_similarity(&entry.chunk.embedding, embedding));
                (ScoredChunk { chunk: entry.chunk.clone(), score }, entry.seq)
            })
            .collect();

        scored.sort_by(|(a, a_seq), (b, b_seq)| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b_seq.cmp(a_seq))
        });
        scored.truncate(k);
        Ok(scored.into_iter().map(|(result, _)| result).collect())
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| missing_collection(collection))?;
        Ok(store.entries.len())
    }
}
