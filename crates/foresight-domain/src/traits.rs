//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::statement::ForwardLookingStatement;
use std::future::Future;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (foresight-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a completion for the prompt
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Name of the model answering prompts
    fn model_name(&self) -> &str;
}

/// Trait for turning a transcript into forward-looking statements
///
/// Implemented by the application layer (foresight-extractor). Fakes of this
/// trait drive processor and batch tests without network access.
///
/// `Ok(vec![])` means the transcript genuinely contains no forward-looking
/// statements; transport or parse failures are reported as `Err`.
pub trait StatementOracle {
    /// Error type for extraction failures
    type Error;

    /// Extract statements from the full transcript text
    fn extract(
        &self,
        transcript: &str,
    ) -> impl Future<Output = Result<Vec<ForwardLookingStatement>, Self::Error>> + Send;
}
