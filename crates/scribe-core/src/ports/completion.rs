//! Text-completion port - abstraction over hosted LLM APIs.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Hosted text-completion providers. Exactly one is active per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    /// Environment variable holding this provider's credential.
    pub fn credential_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::OpenAi => "gpt-3.5-turbo",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
            ProviderKind::OpenAi => "https://api.openai.com",
        }
    }

    /// Where users obtain or rotate a key.
    pub fn console_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://aistudio.google.com/app/apikey",
            ProviderKind::OpenAi => "https://platform.openai.com/api-keys",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => f.write_str("Gemini"),
            ProviderKind::OpenAi => f.write_str("OpenAI"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown AI provider: {0} (expected gemini or openai)")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

/// One provider-neutral completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Raw failure reported by a completion backend, before classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// The provider answered with an error status.
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered but withheld the output.
    #[error("response blocked: {0}")]
    Blocked(String),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Text-completion backend trait.
///
/// Implementations make exactly one outbound call per `complete` and never
/// retry.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    fn provider(&self) -> ProviderKind;

    /// Run one completion. An empty string is a valid answer.
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError>;
}
