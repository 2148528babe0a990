//! Deterministic capability doubles for tests and demos.
//!
//! These run with zero API keys and no network: [`HashEmbedder`] derives
//! a normalized vector from the text itself, [`CannedGenerator`] returns
//! a fixed completion.

use async_trait::async_trait;

use crate::embedding::Embedder;
use crate::error::Result;
use crate::generation::Generator;

/// A deterministic [`Embedder`] whose vectors depend only on the input
/// text.
///
/// The text bytes are hashed and the hash seeds a normalized vector, so
/// identical text always embeds identically and similar runs are fully
/// reproducible. Not a semantic embedding; retrieval quality is whatever
/// the hash gives you.
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create a hash embedder producing vectors of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut embedding = vec![0.0f32; self.dimensions];
        for (i, v) in embedding.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        // L2-normalize so cosine similarity is just the dot product.
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// A [`Generator`] that returns a fixed completion, ignoring its inputs.
pub struct CannedGenerator {
    reply: String,
}

impl CannedGenerator {
    /// Create a generator that always replies with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}

#[async_trait]
impl Generator for CannedGenerator {
    async fn complete(
        &self,
        _system_instruction: &str,
        _context: &str,
        _question: &str,
    ) -> Result<String> {
        Ok(self.reply.clone())
    }
}
