use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post. Posts only ever move between these two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for PostStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A saved blog post. Always owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub topic: String,
    pub target_audience: String,
    pub tone: String,
    /// Requested length at generation time; never recomputed from `content`.
    pub word_count: u32,
    pub seo_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields captured when a generated post is first saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub seo_keywords: Vec<String>,
}

/// Edits allowed from the edit screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none()
    }
}

/// Dashboard list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub search: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &BlogPost) -> bool {
        if let Some(status) = self.status {
            if post.status != status {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                post.title.to_lowercase().contains(&term) || post.topic.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }
}

impl BlogPost {
    /// Create a new post for `user_id` with generated id and timestamps.
    pub fn new(user_id: Uuid, draft: NewBlogPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: draft.title,
            content: draft.content,
            status: draft.status,
            topic: draft.topic,
            target_audience: draft.target_audience,
            tone: draft.tone,
            word_count: draft.word_count,
            seo_keywords: draft.seo_keywords,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Apply edits and move `updated_at` forward. `created_at` and
    /// `word_count` are left alone.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.touch();
    }

    /// Advance `updated_at`, strictly, even when the clock has not moved.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewBlogPost {
        NewBlogPost {
            title: "Blog Post: Rust".to_string(),
            content: "# Rust".to_string(),
            status: PostStatus::Draft,
            topic: "Rust".to_string(),
            target_audience: "developers".to_string(),
            tone: "technical".to_string(),
            word_count: 800,
            seo_keywords: vec!["rust".to_string()],
        }
    }

    #[test]
    fn test_apply_keeps_created_at_and_word_count() {
        let mut post = BlogPost::new(Uuid::new_v4(), draft());
        let created_at = post.created_at;
        let before = post.updated_at;

        post.apply(PostChanges {
            content: Some("short".to_string()),
            status: Some(PostStatus::Published),
            ..Default::default()
        });

        assert_eq!(post.content, "short");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.word_count, 800);
        assert_eq!(post.created_at, created_at);
        assert!(post.updated_at > before);
    }

    #[test]
    fn test_touch_is_strictly_monotonic() {
        let mut post = BlogPost::new(Uuid::new_v4(), draft());
        post.updated_at = Utc::now() + TimeDelta::hours(1);
        let before = post.updated_at;

        post.touch();

        assert!(post.updated_at > before);
    }

    #[test]
    fn test_filter_matches_status_and_search() {
        let mut post = BlogPost::new(Uuid::new_v4(), draft());
        post.status = PostStatus::Published;

        let by_status = PostFilter {
            status: Some(PostStatus::Draft),
            search: None,
        };
        assert!(!by_status.matches(&post));

        let by_topic = PostFilter {
            status: None,
            search: Some("RUS".to_string()),
        };
        assert!(by_topic.matches(&post));

        let miss = PostFilter {
            status: Some(PostStatus::Published),
            search: Some("python".to_string()),
        };
        assert!(!miss.matches(&post));
    }

    #[test]
    fn test_status_round_trips_through_str() {
        assert_eq!("Published".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert_eq!(PostStatus::Draft.to_string(), "draft");
        assert!("archived".parse::<PostStatus>().is_err());
    }
}
