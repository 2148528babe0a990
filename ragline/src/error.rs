//! Error types for the `ragline` crate.

use thiserror::Error;

/// Errors that can occur in retrieval-augmented QA operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// An upstream document source yielded nothing to ingest.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid configuration or malformed caller input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An external capability failed or returned malformed data.
    #[error("External service error ({service}): {message}")]
    ExternalService {
        /// The capability that failed (`embedding`, `vector-store`,
        /// `generation`, or `document-source`).
        service: String,
        /// A description of the failure. Never carries provider-internal
        /// payloads.
        message: String,
    },
}

impl RagError {
    /// Build an [`RagError::ExternalService`] for the named capability.
    pub fn external(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService { service: service.into(), message: message.into() }
    }
}

/// A convenience result type for ragline operations.
pub type Result<T> = std::result::Result<T, RagError>;
