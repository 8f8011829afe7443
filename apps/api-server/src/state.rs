//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use scribe_core::{PostGateway, ProviderAdapter};
use scribe_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use scribe_infra::database::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use scribe_infra::database::{
    DatabaseConnections, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub generator: Arc<ProviderAdapter>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

type Repositories = (Arc<dyn UserRepository>, Arc<dyn PostRepository>);

fn in_memory() -> Repositories {
    (
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
    )
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let backend = config.ai.provider.build().map_err(std::io::Error::other)?;
        let generator = ProviderAdapter::new(backend, config.ai.api_key.clone());

        if generator.is_configured() {
            tracing::info!(
                provider = %generator.provider(),
                model = %config.ai.provider.model,
                "AI provider configured"
            );
        } else {
            tracing::warn!(
                provider = %generator.provider(),
                "{} not set. AI generation will fail until it is configured; demo generation still works.",
                generator.provider().credential_var()
            );
        }

        #[cfg(feature = "postgres")]
        let (users, posts) = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let users: Arc<dyn UserRepository> =
                        Arc::new(PostgresUserRepository::new(connections.main.clone()));
                    let posts: Arc<dyn PostRepository> =
                        Arc::new(PostgresPostRepository::new(connections.main));
                    (users, posts)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, posts) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory()
        };

        tracing::info!("Application state initialized");

        Ok(Self::with_repositories(
            users,
            posts,
            generator,
            JwtConfig::from_env(),
        ))
    }

    pub fn with_repositories(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        generator: ProviderAdapter,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            users,
            posts,
            generator: Arc::new(generator),
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    /// In-memory stores only.
    #[cfg(test)]
    pub fn for_tests(generator: ProviderAdapter) -> Self {
        let (users, posts) = in_memory();
        Self::with_repositories(users, posts, generator, JwtConfig::default())
    }

    /// The post store as seen by `owner`.
    pub fn posts_for(&self, owner: uuid::Uuid) -> PostGateway {
        PostGateway::new(self.posts.clone(), owner)
    }
}
