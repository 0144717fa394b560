//! Hosted language model gateway
//!
//! Thin request/response wrapper around the hosted generative-language-model
//! HTTP API, used for document drafting, chat, translation, and marketing
//! copy. At-least-once intent with no automatic retry: callers surface the
//! error and the user re-submits.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const USER_AGENT: &str = "BondTrack/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway errors
///
/// A failed call, kept distinct from unwanted-but-valid generated text,
/// which is the caller's problem.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network failure or upstream 5xx
    #[error("Language model service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rejected API key
    #[error("Invalid language model credential")]
    InvalidCredential,

    /// Upstream answered without any usable text
    #[error("Language model returned an empty response")]
    EmptyResponse,
}

impl GatewayError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::EmptyResponse => "EMPTY_RESPONSE",
        }
    }
}

/// Text generation task kinds used across the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Draft a compliance or court document
    DocumentDraft,
    /// Conversational assistant reply
    Chat,
    /// Translate free text for a client
    Translation,
    /// Marketing campaign copy
    MarketingCopy,
}

impl TaskKind {
    /// Task name for logging
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DocumentDraft => "document_draft",
            Self::Chat => "chat",
            Self::Translation => "translation",
            Self::MarketingCopy => "marketing_copy",
        }
    }

    /// One-line task framing prepended to the caller's context
    fn preamble(self) -> &'static str {
        match self {
            Self::DocumentDraft => "Draft the following bail bond agency document:",
            Self::Chat => "Reply helpfully to the following message:",
            Self::Translation => "Translate the following text as requested:",
            Self::MarketingCopy => "Write marketing copy for the following campaign:",
        }
    }
}

/// Text generation seam
///
/// The gateway is a black box to its callers; implementations other than
/// `LlmGateway` exist only for tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a task from free-text context
    async fn generate(&self, task: TaskKind, context: &str) -> Result<String, GatewayError>;
}

// Wire types for the generateContent call

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Hosted language model API client
pub struct LlmGateway {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl LlmGateway {
    pub fn new(api_key: String) -> Result<Self, GatewayError> {
        Self::with_endpoint(api_key, DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string())
    }

    /// Client against a non-default endpoint (self-hosted proxy, tests)
    pub fn with_endpoint(
        api_key: String,
        base_url: String,
        model: String,
    ) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            model,
            api_key,
        })
    }
}

#[async_trait]
impl TextGenerator for LlmGateway {
    async fn generate(&self, task: TaskKind, context: &str) -> Result<String, GatewayError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let prompt = format!("{}\n\n{}", task.preamble(), context);

        tracing::debug!(task = task.as_str(), context_len = context.len(), "Calling language model");

        let response = self
            .http_client
            .post(&url)
            .json(&GenerateRequest {
                contents: vec![Content {
                    parts: vec![Part { text: prompt }],
                }],
            })
            .send()
            .await
            .map_err(|e| GatewayError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(GatewayError::InvalidCredential);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::ServiceUnavailable(format!("{}: {}", status, error_text)));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ServiceUnavailable(e.to_string()))?;

        let text = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)?;

        tracing::info!(task = task.as_str(), generated_len = text.len(), "Language model call successful");
        Ok(text)
    }
}
