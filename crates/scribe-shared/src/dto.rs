//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scribe_core::domain::{BlogPost, NewBlogPost, PostChanges, PostStatus};

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Body of `POST /api/posts` - a generated post being saved.
pub type CreatePostRequest = NewBlogPost;

/// Body of `PUT /api/posts/{id}`.
pub type UpdatePostRequest = PostChanges;

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    /// `all`, `draft` or `published`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// A saved post as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub topic: String,
    pub target_audience: String,
    pub tone: String,
    pub word_count: u32,
    pub seo_keywords: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BlogPost> for PostResponse {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            status: post.status,
            topic: post.topic,
            target_audience: post.target_audience,
            tone: post.tone,
            word_count: post.word_count,
            seo_keywords: post.seo_keywords,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}
