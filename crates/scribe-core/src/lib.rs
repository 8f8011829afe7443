//! # Scribe Core
//!
//! The domain layer of the Scribe blog generator.
//! Pure business logic: blog posts and their owners, the template engine,
//! the provider-neutral prompt builder and adapter, and the owner-scoped
//! record-store gateway. Infrastructure plugs in through [`ports`].

pub mod domain;
pub mod error;
pub mod gateway;
pub mod generation;
pub mod ports;
pub mod template;

pub use error::{DomainError, ErrorKind, GenerationError};
pub use gateway::PostGateway;
pub use generation::ProviderAdapter;
