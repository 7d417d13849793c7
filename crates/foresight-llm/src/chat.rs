//! Chat-completions Provider Implementation
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint (DeepSeek by
//! default) with bearer-token authorization.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Configurable endpoint, model, sampling temperature and token budget
//! - Bounded request timeout
//! - Exactly one request per prompt: no retries and no backoff
//!
//! # Examples
//!
//! ```no_run
//! use foresight_llm::{ChatProvider, ChatProviderConfig};
//!
//! let provider = ChatProvider::new(ChatProviderConfig::default(), "sk-...").unwrap();
//! ```

use crate::LlmError;
use foresight_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default model name
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Default completion token budget
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// System message sent ahead of every prompt
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a specialized financial analysis engine. \
Return only valid JSON in the specified format. \
For percentage values, ALWAYS include the % symbol and correct sign. \
For ranges, calculate the midpoint with correct sign. \
Use only US GAAP compliant financial metric names.";

/// Settings for a [`ChatProvider`]
///
/// The API key is deliberately not part of this struct: it is resolved at
/// startup from the environment or the credential store and handed to
/// [`ChatProvider::new`] separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatProviderConfig {
    /// Full URL of the chat-completions endpoint
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum completion tokens
    pub max_tokens: u32,
    /// System message
    pub system_prompt: String,
}

impl Default for ChatProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl ChatProviderConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} out of range [0.0, 2.0]", self.temperature));
        }
        Ok(())
    }
}

/// Provider for OpenAI-compatible chat-completions APIs
pub struct ChatProvider {
    config: ChatProviderConfig,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatProvider {
    /// Create a new chat provider
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingApiKey` for a blank key, and
    /// `LlmError::Other` if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ChatProviderConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        config.validate().map_err(LlmError::Other)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// The provider's configuration
    pub fn config(&self) -> &ChatProviderConfig {
        &self.config
    }

    /// Send one prompt and return the assistant message content
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached or the request times out
    /// - The API key is rejected (401)
    /// - Any other non-success status is returned
    /// - The body has no `choices[0].message.content`
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            "POST {} (model {}, prompt {} chars)",
            self.config.endpoint,
            self.config.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LlmError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.config.timeout_secs)
            } else {
                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
    }
}

impl LlmProviderTrait for ChatProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
