//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_oracle_reply;
use crate::prompt::PromptBuilder;
use foresight_domain::traits::{LlmProvider, StatementOracle};
use foresight_domain::ForwardLookingStatement;
use foresight_gatekeeper::Gatekeeper;
use std::fmt::Display;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Extractor asks an LLM for forward-looking statements and reviews them
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    gatekeeper: Gatekeeper,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Sync,
    L::Error: Display + Send,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, gatekeeper: Gatekeeper, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            gatekeeper,
            config,
        }
    }

    /// The extractor's configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract reviewed statements from a transcript
    ///
    /// Exactly one oracle call is made. Statements rejected by the gatekeeper
    /// are logged and left out of the result.
    pub async fn extract_statements(
        &self,
        transcript: &str,
    ) -> Result<Vec<ForwardLookingStatement>, ExtractorError> {
        let prompt = PromptBuilder::new(transcript)
            .with_max_length(self.config.max_text_length)
            .build();

        debug!(
            "Prompt length: {} chars (model {})",
            prompt.len(),
            self.llm_provider.model_name()
        );

        let reply = timeout(
            self.config.extraction_timeout(),
            self.llm_provider.generate(&prompt),
        )
        .await
        .map_err(|_| ExtractorError::Timeout(self.config.extraction_timeout_secs))?
        .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("LLM reply length: {} chars", reply.len());

        let candidates = parse_oracle_reply(&reply)?;
        let total = candidates.len();

        let mut accepted = Vec::with_capacity(total);
        for candidate in candidates {
            let review = self.gatekeeper.review(candidate);
            if review.is_accepted() {
                accepted.push(review.statement);
            } else {
                warn!(
                    "Rejected {} statement {:?}: {:?}",
                    review.statement.category, review.statement.sentence, review.issues
                );
            }
        }

        info!(
            "Extraction complete: {} statements accepted, {} rejected",
            accepted.len(),
            total - accepted.len()
        );

        Ok(accepted)
    }
}

impl<L> StatementOracle for Extractor<L>
where
    L: LlmProvider + Sync,
    L::Error: Display + Send,
{
    type Error = ExtractorError;

    async fn extract(&self, transcript: &str) -> Result<Vec<ForwardLookingStatement>, Self::Error> {
        self.extract_statements(transcript).await
    }
}
