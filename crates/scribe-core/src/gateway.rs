//! Record store gateway - owner-scoped access to saved posts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{BlogPost, NewBlogPost, PostChanges, PostFilter, PostStats};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

const MAX_TITLE_LEN: usize = 200;

/// The post store as seen by one signed-in user.
///
/// Posts belonging to anyone else are indistinguishable from missing ones.
#[derive(Clone)]
pub struct PostGateway {
    posts: Arc<dyn PostRepository>,
    owner: Uuid,
}

impl PostGateway {
    pub fn new(posts: Arc<dyn PostRepository>, owner: Uuid) -> Self {
        Self { posts, owner }
    }

    /// Persist a freshly generated post.
    pub async fn insert(&self, draft: NewBlogPost) -> Result<BlogPost, DomainError> {
        validate_title(&draft.title)?;
        validate_content(&draft.content)?;

        let post = BlogPost::new(self.owner, draft);
        self.posts.save(post).await.map_err(internal)
    }

    pub async fn select(&self, id: Uuid) -> Result<BlogPost, DomainError> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(internal)?
            .filter(|post| post.is_owned_by(self.owner))
            .ok_or(DomainError::NotFound {
                entity_type: "BlogPost",
                id,
            })
    }

    /// The owner's posts matching `filter`, newest first.
    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<BlogPost>, DomainError> {
        let posts = self
            .posts
            .find_by_user_id(self.owner)
            .await
            .map_err(internal)?;

        Ok(posts
            .into_iter()
            .filter(|post| post.is_owned_by(self.owner) && filter.matches(post))
            .collect())
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<BlogPost, DomainError> {
        if let Some(title) = &changes.title {
            validate_title(title)?;
        }

        let mut post = self.select(id).await?;
        post.apply(changes);
        self.posts.save(post).await.map_err(internal)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let post = self.select(id).await?;
        match self.posts.delete(post.id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::NotFound {
                entity_type: "BlogPost",
                id,
            }),
            Err(e) => Err(internal(e)),
        }
    }

    pub async fn stats(&self, now: DateTime<Utc>) -> Result<PostStats, DomainError> {
        let posts = self.list(&PostFilter::default()).await?;
        Ok(PostStats::from_posts(&posts, now))
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation("Title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation("Title too long".to_string()));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::Validation("Content is required".to_string()));
    }
    Ok(())
}

fn internal(err: RepoError) -> DomainError {
    DomainError::Internal(err.to_string())
}
