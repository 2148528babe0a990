//! # ragline
//!
//! Retrieval-augmented question answering over ingested documents.
//!
//! ## Overview
//!
//! `ragline` implements the complete ingest-and-query pipeline: documents
//! are split into bounded, overlapping chunks, embedded, and stored in a
//! similarity-searchable collection; questions are embedded, matched
//! against the collection, and answered by a generation capability that
//! is confined to the retrieved context. Answers carry traceable source
//! excerpts with real similarity scores.
//!
//! The external capabilities (embedding, generation, vector storage, the
//! upstream document source) sit behind small traits with swappable
//! implementations, so the whole pipeline is testable deterministically
//! and offline via the [`mock`] doubles.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ragline::mock::{CannedGenerator, HashEmbedder};
//! use ragline::{
//!     Document, InMemoryVectorStore, RagConfig, RagService, RecursiveSplitter,
//! };
//!
//! # async fn run() -> ragline::Result<()> {
//! let config = RagConfig::default();
//! let service = RagService::builder()
//!     .config(config.clone())
//!     .splitter(Arc::new(RecursiveSplitter::from_config(&config)?))
//!     .embedder(Arc::new(HashEmbedder::new(64)))
//!     .store(Arc::new(InMemoryVectorStore::new()))
//!     .generator(Arc::new(CannedGenerator::new("canned reply")))
//!     .build()?;
//! service.init().await?;
//!
//! let docs = vec![Document::new("doc1", "Aspirin reduces pain and fever.", "labels")];
//! let chunks_created = service.ingest(&docs).await?;
//! let answer = service.query("What does aspirin do?", None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! | Feature | Provides |
//! |---------|----------|
//! | `jina`  | [`jina::JinaEmbedder`] over the Jina embeddings API |
//! | `groq`  | [`groq::GroqGenerator`] over the Groq chat API |
//! | `full`  | Both of the above |

pub mod chunking;
pub mod composer;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
#[cfg(feature = "groq")]
pub mod groq;
pub mod index;
pub mod inmemory;
#[cfg(feature = "jina")]
pub mod jina;
pub mod mock;
pub mod pipeline;
pub mod retriever;
pub mod source;
pub mod vectorstore;

pub use chunking::{RecursiveSplitter, TextSplitter};
pub use composer::{AnswerComposer, INSUFFICIENT_INFORMATION};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Answer, Chunk, Document, ScoredChunk, SourcePreview};
pub use embedding::Embedder;
pub use error::{RagError, Result};
pub use generation::Generator;
pub use index::Index;
pub use inmemory::InMemoryVectorStore;
pub use pipeline::{DEFAULT_COLLECTION, RagService, RagServiceBuilder};
pub use retriever::Retriever;
pub use source::{DocumentSource, RecordFormatter, SectionSpec, SourceRecord, fetch_documents};
pub use vectorstore::VectorStore;
