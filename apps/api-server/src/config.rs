//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use scribe_core::ports::ProviderKind;
use scribe_infra::database::DatabaseConfig;
use scribe_infra::providers::ProviderConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub ai: AiSettings,
}

/// Completion provider selection plus its credential.
#[derive(Clone)]
pub struct AiSettings {
    pub provider: ProviderConfig,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSettings")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(100),
                min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(10),
            });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT").unwrap_or(8080),
            database,
            ai: AiSettings::from_lookup(&lookup),
        }
    }
}

impl AiSettings {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let kind = match lookup("AI_PROVIDER") {
            Some(name) => name.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to the default AI provider");
                ProviderKind::default()
            }),
            None => ProviderKind::default(),
        };

        let mut provider = ProviderConfig::for_provider(kind);
        if let Some(model) = lookup("AI_MODEL").filter(|m| !m.trim().is_empty()) {
            provider = provider.with_model(model.trim());
        }
        if let Some(base_url) = lookup("AI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            provider = provider.with_base_url(base_url.trim());
        }
        if let Some(secs) = parse_var::<u64>(lookup, "AI_TIMEOUT_SECS") {
            provider = provider.with_timeout(Duration::from_secs(secs.max(1)));
        }

        Self {
            provider,
            api_key: lookup(kind.credential_var()),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
