//! AI generation path: prompt construction, the provider adapter, and
//! classification of backend failures.

mod adapter;
mod classify;
pub mod prompt;

pub use adapter::{EMPTY_COMPLETION_PLACEHOLDER, ProviderAdapter};
pub use classify::classify;
