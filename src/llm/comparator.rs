//! Core [`Comparator`] trait and the HTTP-backed [`ApiComparator`].
//!
//! `ApiComparator` speaks either the Gemini `generateContent` format or any
//! OpenAI-compatible `/v1/chat/completions` endpoint, chosen by
//! [`LlmProvider`].  All connection details come from [`LlmConfig`]; the API
//! key is read from the environment on every call.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{LlmConfig, LlmProvider};
use crate::llm::prompt::PromptBuilder;
use crate::llm::wire;

/// Returned in place of the report when the backend answers with no text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "Không thể tạo phản hồi. Vui lòng thử lại.";

/// Longest slice of an error response body kept in [`CompareError::Status`].
const STATUS_BODY_LIMIT: usize = 512;

// ---------------------------------------------------------------------------
// CompareError
// ---------------------------------------------------------------------------

/// Errors that can occur during a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// The API key environment variable is unset or empty.  Raised before
    /// any network activity.
    #[error("API key is missing: environment variable `{0}` is not set")]
    MissingCredential(String),

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("comparison request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("failed to parse backend response: {0}")]
    Parse(String),
}

impl CompareError {
    /// `true` for local configuration problems, `false` for backend failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CompareError::MissingCredential(_))
    }
}

impl From<reqwest::Error> for CompareError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CompareError::Timeout
        } else {
            CompareError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Comparator trait
// ---------------------------------------------------------------------------

/// Async comparison of an original text against a draft transcript.
///
/// Implementors must be `Send + Sync` so they can be shared with the
/// pipeline task as `Arc<dyn Comparator>`.  One call is exactly one attempt.
#[async_trait]
pub trait Comparator: Send + Sync {
    async fn compare(&self, original: &str, draft: &str) -> Result<String, CompareError>;
}

// ---------------------------------------------------------------------------
// ApiComparator
// ---------------------------------------------------------------------------

pub struct ApiComparator {
    client: reqwest::Client,
    config: LlmConfig,
    prompt_builder: PromptBuilder,
}

impl ApiComparator {
    /// Build an `ApiComparator` from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`.  A default client is used if the builder fails.
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            prompt_builder: PromptBuilder::new(),
        }
    }

    /// Read the API key from the configured environment variable.
    fn api_key(&self) -> Result<String, CompareError> {
        match std::env::var(&self.config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CompareError::MissingCredential(
                self.config.api_key_env.clone(),
            )),
        }
    }

    fn endpoint(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match self.config.provider {
            LlmProvider::Gemini => format!("{base}{}", wire::gemini_path(&self.config.model)),
            LlmProvider::OpenAiCompatible => format!("{base}{}", wire::OPENAI_PATH),
        }
    }
}

#[async_trait]
impl Comparator for ApiComparator {
    async fn compare(&self, original: &str, draft: &str) -> Result<String, CompareError> {
        let key = self.api_key()?;
        let (system_msg, user_msg) = self.prompt_builder.build_chat(original, draft);
        let url = self.endpoint();

        log::debug!(
            "comparator: POST {url} ({:?}, original={}B, draft={}B)",
            self.config.provider,
            original.len(),
            draft.len()
        );

        let req = match self.config.provider {
            LlmProvider::Gemini => self
                .client
                .post(&url)
                .header("x-goog-api-key", key)
                .json(&wire::gemini_body(&self.config, &system_msg, &user_msg)),
            LlmProvider::OpenAiCompatible => self
                .client
                .post(&url)
                .bearer_auth(key)
                .json(&wire::openai_body(&self.config, &system_msg, &user_msg)),
        };

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(STATUS_BODY_LIMIT)
                .collect();
            return Err(CompareError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompareError::Parse(e.to_string()))?;

        let text = match self.config.provider {
            LlmProvider::Gemini => wire::gemini_text(&json),
            LlmProvider::OpenAiCompatible => wire::openai_text(&json),
        };

        if text.is_empty() {
            log::warn!("comparator: backend returned no text");
            return Ok(EMPTY_REPLY_PLACEHOLDER.to_string());
        }

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
