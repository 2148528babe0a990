//! Generation capability trait for producing grounded completions.

use async_trait::async_trait;

use crate::error::Result;

/// A capability that completes a grounded generation request.
///
/// The [`AnswerComposer`](crate::AnswerComposer) passes the containment
/// instruction, the assembled retrieval context, and the user question as
/// separate arguments; how they map onto the provider's wire format is up
/// to the implementation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce an answer from the given instruction, context, and question.
    async fn complete(
        &self,
        system_instruction: &str,
        context: &str,
        question: &str,
    ) -> Result<String>;
}
