//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::ProviderKind;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Closed set of generation failure categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConfigurationMissing,
    QuotaExceeded,
    RateLimited,
    AuthenticationInvalid,
    ContentFiltered,
    Unavailable,
    MalformedRequest,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConfigurationMissing => "configuration_missing",
            ErrorKind::QuotaExceeded => "quota_exceeded",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::AuthenticationInvalid => "authentication_invalid",
            ErrorKind::ContentFiltered => "content_filtered",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::MalformedRequest => "malformed_request",
        }
    }
}

/// A classified generation failure.
///
/// The `Display` text is the user-facing message placed in the response
/// envelope; [`GenerationError::remediation`] is the follow-up hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(
        "{} API key not configured. Please add {} to your environment variables.",
        .provider,
        .provider.credential_var()
    )]
    ConfigurationMissing { provider: ProviderKind },

    #[error("{provider} quota exceeded. Please check your API quota or use the demo content option.")]
    QuotaExceeded { provider: ProviderKind },

    #[error("Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited,

    #[error("Invalid {provider} API key. Please check your API key configuration.")]
    AuthenticationInvalid { provider: ProviderKind },

    #[error("Content blocked by safety filters. Please try a different topic or tone.")]
    ContentFiltered,

    #[error("Failed to generate blog post. Please try again.")]
    Unavailable,

    #[error("Invalid generation request: {0}")]
    MalformedRequest(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::ConfigurationMissing { .. } => ErrorKind::ConfigurationMissing,
            GenerationError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            GenerationError::RateLimited => ErrorKind::RateLimited,
            GenerationError::AuthenticationInvalid { .. } => ErrorKind::AuthenticationInvalid,
            GenerationError::ContentFiltered => ErrorKind::ContentFiltered,
            GenerationError::Unavailable => ErrorKind::Unavailable,
            GenerationError::MalformedRequest(_) => ErrorKind::MalformedRequest,
        }
    }

    /// What the user can do about it.
    pub fn remediation(&self) -> String {
        match self {
            GenerationError::ConfigurationMissing { provider } => format!(
                "Get an API key from {}, set {} in your environment (or .env file), then restart the server.",
                provider.console_url(),
                provider.credential_var()
            ),
            GenerationError::QuotaExceeded { provider } => format!(
                "Check your usage limits at {}, or use the demo generator while your quota resets.",
                provider.console_url()
            ),
            GenerationError::RateLimited => {
                "Wait a few minutes before trying again, or use the demo generator.".to_string()
            }
            GenerationError::AuthenticationInvalid { provider } => format!(
                "Verify or rotate your key at {} and update {}.",
                provider.console_url(),
                provider.credential_var()
            ),
            GenerationError::ContentFiltered => {
                "Rephrase the topic or pick a different tone.".to_string()
            }
            GenerationError::Unavailable => {
                "Try again shortly, or use the demo generator instead.".to_string()
            }
            GenerationError::MalformedRequest(_) => {
                "Send a JSON body with a non-empty topic.".to_string()
            }
        }
    }
}
