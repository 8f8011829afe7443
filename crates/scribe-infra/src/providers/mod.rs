//! Hosted text-completion backends over HTTPS.
//!
//! Each backend makes one request per completion with a bounded timeout
//! and reports raw failures; classification happens in `scribe-core`.

mod gemini;
mod openai;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use scribe_core::ports::{CompletionError, ProviderKind, TextCompletion};

pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Which provider to call and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Stock model and endpoint for `kind`.
    pub fn for_provider(kind: ProviderKind) -> Self {
        Self {
            kind,
            model: kind.default_model().to_string(),
            base_url: kind.default_base_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the backend for the configured provider.
    pub fn build(&self) -> Result<Arc<dyn TextCompletion>, reqwest::Error> {
        let client = Client::builder().timeout(self.timeout).build()?;

        Ok(match self.kind {
            ProviderKind::Gemini => Arc::new(GeminiBackend::new(
                client,
                self.base_url.clone(),
                self.model.clone(),
            )),
            ProviderKind::OpenAi => Arc::new(OpenAiBackend::new(
                client,
                self.base_url.clone(),
                self.model.clone(),
            )),
        })
    }
}

fn send_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        // Drop the URL; some providers accept credentials as query params.
        CompletionError::Transport(err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_provider() {
        let gemini = ProviderConfig::for_provider(ProviderKind::Gemini);
        assert_eq!(gemini.model, "gemini-1.5-flash");
        assert_eq!(gemini.timeout, DEFAULT_TIMEOUT);

        let openai = ProviderConfig::for_provider(ProviderKind::OpenAi);
        assert_eq!(openai.model, "gpt-3.5-turbo");
        assert_eq!(openai.base_url, "https://api.openai.com");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ProviderConfig::for_provider(ProviderKind::OpenAi)
            .with_base_url("http://localhost:8089/");
        assert_eq!(config.base_url, "http://localhost:8089");
    }

    #[test]
    fn test_build_selects_backend() {
        for kind in [ProviderKind::Gemini, ProviderKind::OpenAi] {
            let backend = ProviderConfig::for_provider(kind).build().unwrap();
            assert_eq!(backend.provider(), kind);
        }
    }
}
