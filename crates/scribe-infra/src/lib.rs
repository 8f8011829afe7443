//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`:
//! post and user stores, JWT/Argon2 authentication, and the hosted
//! text-completion backends.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - in-memory repositories only

pub mod auth;
pub mod database;
pub mod providers;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};
pub use providers::{GeminiBackend, OpenAiBackend, ProviderConfig};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository, PostgresUserRepository};
