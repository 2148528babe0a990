//! Configuration for the QA pipeline.
//!
//! [`RagConfig`] is an explicitly constructed value passed into the
//! [`RagService`](crate::RagService) builder. There is no process-wide
//! settings singleton; construct one per service instance.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for ingestion and query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of characters shared between consecutive chunks.
    pub chunk_overlap: usize,
    /// Default number of results retrieved per query.
    pub top_k: usize,
    /// Upper bound for caller-supplied `k`; out-of-range values are
    /// clamped into `[1, max_top_k]`.
    pub max_top_k: usize,
    /// Minimum question length in characters; shorter queries are
    /// rejected with a validation error.
    pub min_question_len: usize,
    /// Maximum source preview length in characters.
    pub preview_len: usize,
    /// Minimum similarity score for retrieved results; results below
    /// this are dropped before answer composition.
    pub similarity_threshold: f32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 3,
            max_top_k: 20,
            min_question_len: 5,
            preview_len: 150,
            similarity_threshold: 0.0,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the default number of results retrieved per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the upper bound for caller-supplied `k`.
    pub fn max_top_k(mut self, k: usize) -> Self {
        self.config.max_top_k = k;
        self
    }

    /// Set the minimum accepted question length in characters.
    pub fn min_question_len(mut self, len: usize) -> Self {
        self.config.min_question_len = len;
        self
    }

    /// Set the maximum source preview length in characters.
    pub fn preview_len(mut self, len: usize) -> Self {
        self.config.preview_len = len;
        self
    }

    /// Set the minimum similarity score for retrieved results.
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Validation`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0` or `top_k > max_top_k`
    /// - `preview_len == 0`
    pub fn build(self) -> Result<RagConfig> {
        let config = self.config;
        if config.chunk_size == 0 {
            return Err(RagError::Validation("chunk_size must be greater than zero".to_string()));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(RagError::Validation(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        if config.top_k == 0 {
            return Err(RagError::Validation("top_k must be greater than zero".to_string()));
        }
        if config.top_k > config.max_top_k {
            return Err(RagError::Validation(format!(
                "top_k ({}) must not exceed max_top_k ({})",
                config.top_k, config.max_top_k
            )));
        }
        if config.preview_len == 0 {
            return Err(RagError::Validation("preview_len must be greater than zero".to_string()));
        }
        Ok(config)
    }
}
