use crate::error::GenerationError;
use crate::ports::{CompletionError, ProviderKind};

/// Map a raw backend failure to a [`GenerationError`].
///
/// Message keywords win over the HTTP status. Transport failures and
/// timeouts are always `Unavailable`, and a blocked response is always
/// `ContentFiltered` whatever reason the provider attached.
pub fn classify(provider: ProviderKind, error: &CompletionError) -> GenerationError {
    match error {
        CompletionError::Timeout | CompletionError::Transport(_) => GenerationError::Unavailable,
        CompletionError::Provider { status, message } => {
            classify_message(provider, message).unwrap_or(match status {
                429 => GenerationError::RateLimited,
                401 | 403 => GenerationError::AuthenticationInvalid { provider },
                _ => GenerationError::Unavailable,
            })
        }
        CompletionError::Blocked(_) => GenerationError::ContentFiltered,
        CompletionError::InvalidResponse(reason) => {
            classify_message(provider, reason).unwrap_or(GenerationError::Unavailable)
        }
    }
}

fn classify_message(provider: ProviderKind, message: &str) -> Option<GenerationError> {
    let lower = message.to_lowercase();

    if lower.contains("quota") {
        Some(GenerationError::QuotaExceeded { provider })
    } else if mentions_rate_limit(&lower) {
        Some(GenerationError::RateLimited)
    } else if message.contains("API_KEY")
        || lower.contains("api key")
        || lower.contains("api_key")
        || lower.contains("authentication")
    {
        Some(GenerationError::AuthenticationInvalid { provider })
    } else if lower.contains("safety") {
        Some(GenerationError::ContentFiltered)
    } else {
        None
    }
}

const RATE_LIMIT_SPELLINGS: [&str; 4] = ["ratelimit", "rate limit", "rate-limit", "rate_limit"];

/// Matches "userRateLimitExceeded" and "Rate exceeded" but not "generate".
fn mentions_rate_limit(lower: &str) -> bool {
    RATE_LIMIT_SPELLINGS.iter().any(|spelling| lower.contains(spelling))
        || lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word.starts_with("rate"))
}
