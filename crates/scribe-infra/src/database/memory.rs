//! In-memory repositories - used when no `DATABASE_URL` is configured.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{BlogPost, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        // Mirrors the unique index on users.email.
        let taken = store
            .values()
            .any(|u| u.id != entity.id && u.email == entity.email);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        store.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let email = email.trim().to_lowercase();
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        self.store.write().await.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<BlogPost>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<BlogPost> = store
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}
