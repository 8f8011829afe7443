//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod completion;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use completion::{
    CompletionError, CompletionRequest, ProviderKind, TextCompletion, UnknownProvider,
};
pub use repository::{BaseRepository, PostRepository, UserRepository};
