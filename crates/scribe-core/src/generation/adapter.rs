use std::fmt;
use std::sync::Arc;

use super::{classify, prompt};
use crate::domain::GenerationRequest;
use crate::error::GenerationError;
use crate::ports::{ProviderKind, TextCompletion};

/// Returned in place of an empty completion.
pub const EMPTY_COMPLETION_PLACEHOLDER: &str = "Failed to generate content";

/// Turns a [`GenerationRequest`] into one call on the configured backend.
///
/// Holds the credential separately from the backend so a missing key is
/// reported before any network traffic.
pub struct ProviderAdapter {
    backend: Arc<dyn TextCompletion>,
    api_key: Option<String>,
}

impl ProviderAdapter {
    /// Blank keys count as missing.
    pub fn new(backend: Arc<dyn TextCompletion>, api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Self { backend, api_key }
    }

    pub fn provider(&self) -> ProviderKind {
        self.backend.provider()
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a post body. The provider's text is returned verbatim.
    pub async fn complete(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let provider = self.provider();
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::ConfigurationMissing { provider })?;

        let call = prompt::completion_request(request);
        let text = self
            .backend
            .complete(api_key, &call)
            .await
            .map_err(|e| classify(provider, &e))?;

        if text.is_empty() {
            return Ok(EMPTY_COMPLETION_PLACEHOLDER.to_string());
        }
        Ok(text)
    }
}

impl fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("provider", &self.provider())
            .field("configured", &self.is_configured())
            .finish()
    }
}
