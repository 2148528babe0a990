//! Ingestion and query pipelines.
//!
//! [`RagService`] coordinates the full workflow by composing a
//! [`TextSplitter`], an [`Embedder`], a [`VectorStore`], and a
//! [`Generator`]. Ingestion flows one way (documents, chunks, vectors,
//! index); query flows one way (question, vector, retrieved chunks,
//! answer). Every call runs to completion before returning; the service
//! suspends only at external-call boundaries.
//!
//! # Example
//!
//! ```rust,ignore
//! use ragline::{RagConfig, RagService, InMemoryVectorStore, RecursiveSplitter};
//!
//! let config = RagConfig::default();
//! let service = RagService::builder()
//!     .config(config.clone())
//!     .splitter(Arc::new(RecursiveSplitter::from_config(&config)?))
//!     .embedder(Arc::new(my_embedder))
//!     .store(Arc::new(InMemoryVectorStore::new()))
//!     .generator(Arc::new(my_generator))
//!     .build()?;
//!
//! service.init().await?;
//! let chunks_created = service.ingest(&documents).await?;
//! let answer = service.query("What are the side effects?", None).await?;
//! ```

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::chunking::TextSplitter;
use crate::composer::AnswerComposer;
use crate::config::RagConfig;
use crate::document::{Answer, Document, ScoredChunk};
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::generation::Generator;
use crate::index::Index;
use crate::retriever::Retriever;
use crate::vectorstore::VectorStore;

/// Name of the collection a service uses unless overridden.
pub const DEFAULT_COLLECTION: &str = "ragline_documents";

/// The QA service orchestrator.
///
/// Exposes the ingestion pipeline ([`ingest`](RagService::ingest)), the
/// query pipeline ([`query`](RagService::query)), and collection
/// lifecycle operations ([`clear`](RagService::clear),
/// [`init`](RagService::init)). Construct one via
/// [`RagService::builder()`]; all collaborators are injected, there is no
/// ambient global state.
pub struct RagService {
    config: RagConfig,
    splitter: Arc<dyn TextSplitter>,
    embedder: Arc<dyn Embedder>,
    index: Arc<Index>,
    retriever: Retriever,
    composer: AnswerComposer,
}

impl std::fmt::Debug for RagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RagService {
    /// Create a new [`RagServiceBuilder`].
    pub fn builder() -> RagServiceBuilder {
        RagServiceBuilder::default()
    }

    /// Return a reference to the service configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the active index.
    pub fn index(&self) -> &Arc<Index> {
        &self.index
    }

    /// Create the active collection if it does not exist yet.
    ///
    /// Call once after construction; calling again is a no-op.
    pub async fn init(&self) -> Result<()> {
        self.index.ensure_collection().await
    }

    /// Ingest documents: split, embed, and add to the active collection.
    ///
    /// Returns the total number of chunks created. Empty input is a no-op
    /// returning 0, not an error. Each document is embedded and stored as
    /// its own sub-batch: when a capability fails partway through, the
    /// documents already processed remain committed and the failing
    /// document's chunks do not land.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ExternalService`] if embedding or storage
    /// fails; the error names the stage and the document being ingested.
    pub async fn ingest(&self, documents: &[Document]) -> Result<usize> {
        if documents.is_empty() {
            info!(chunk_count = 0, "ingest called with no documents");
            return Ok(0);
        }

        let mut chunks_created = 0usize;
        for document in documents {
            let chunks = self.splitter.split(document);
            if chunks.is_empty() {
                warn!(document.id = %document.id, "document produced no chunks");
                continue;
            }
            let stored = self.index.add(chunks).await.map_err(|e| {
                error!(document.id = %document.id, error = %e, "ingestion failed");
                e
            })?;
            chunks_created += stored;
        }

        info!(document_count = documents.len(), chunks_created, "ingestion complete");
        Ok(chunks_created)
    }

    /// Answer a question from the ingested documents.
    ///
    /// Embeds the question, retrieves the top `k` chunks (the configured
    /// default when `None`, clamped into `[1, max_top_k]` otherwise),
    /// drops results under the similarity threshold, and composes the
    /// answer. Against an empty collection this returns the
    /// insufficient-information [`Answer`], never an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Validation`] if the question is shorter than
    /// the configured minimum, and [`RagError::ExternalService`] if any
    /// external capability fails. A capability failure is never silently
    /// downgraded into a degraded answer.
    pub async fn query(&self, question: &str, k: Option<usize>) -> Result<Answer> {
        let question = question.trim();
        if question.chars().count() < self.config.min_question_len {
            return Err(RagError::Validation(format!(
                "question must be at least {} characters",
                self.config.min_question_len
            )));
        }

        let query_embedding = self.embedder.embed(question).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            e
        })?;

        let retrieved = self.retriever.retrieve(&query_embedding, k).await?;

        let threshold = self.config.similarity_threshold;
        let retrieved: Vec<ScoredChunk> =
            retrieved.into_iter().filter(|r| r.score >= threshold).collect();

        let answer = self.composer.compose(question, &retrieved).await?;

        info!(source_count = answer.sources.len(), "query completed");
        Ok(answer)
    }

    /// Discard every chunk in the active collection.
    ///
    /// Atomic from the caller's perspective and idempotent: clearing an
    /// empty collection succeeds and leaves it queryable.
    pub async fn clear(&self) -> Result<()> {
        self.index.reset().await
    }
}

/// Builder for constructing a [`RagService`].
///
/// All fields are required. Call [`build()`](RagServiceBuilder::build) to
/// validate and produce the service.
#[derive(Default)]
pub struct RagServiceBuilder {
    config: Option<RagConfig>,
    splitter: Option<Arc<dyn TextSplitter>>,
    embedder: Option<Arc<dyn Embedder>>,
    store: Option<Arc<dyn VectorStore>>,
    generator: Option<Arc<dyn Generator>>,
    collection: Option<String>,
}

impl RagServiceBuilder {
    /// Set the service configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the document splitter.
    pub fn splitter(mut self, splitter: Arc<dyn TextSplitter>) -> Self {
        self.splitter = Some(splitter);
        self
    }

    /// Set the embedding capability.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the generation capability.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Override the active collection name
    /// (default: [`DEFAULT_COLLECTION`]).
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    /// Build the [`RagService`], validating that all required fields are
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Validation`] if any required field is missing.
    pub fn build(self) -> Result<RagService> {
        let config =
            self.config.ok_or_else(|| RagError::Validation("config is required".to_string()))?;
        let splitter = self
            .splitter
            .ok_or_else(|| RagError::Validation("splitter is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::Validation("embedder is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| RagError::Validation("store is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| RagError::Validation("generator is required".to_string()))?;
        let collection = self.collection.unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let index = Arc::new(Index::new(Arc::clone(&embedder), store, collection));
        let retriever = Retriever::new(Arc::clone(&index), config.top_k, config.max_top_k);
        let composer = AnswerComposer::new(generator, config.preview_len);

        Ok(RagService { config, splitter, embedder, index, retriever, composer })
    }
}
