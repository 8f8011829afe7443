//! Domain entities - the core business objects.

mod generation;
mod plan;
mod post;
mod stats;
mod user;

pub use generation::{
    DEFAULT_TONE, DEFAULT_WORD_COUNT, GenerationRequest, Tone, UnknownTone, WORD_COUNT_PRESETS,
};
pub use plan::{PRICING_PLANS, PricingPlan};
pub use post::{BlogPost, NewBlogPost, PostChanges, PostFilter, PostStatus, UnknownStatus};
pub use stats::PostStats;
pub use user::User;
