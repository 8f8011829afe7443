//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use scribe_core::domain::{BlogPost, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{PostRepository, UserRepository};

use super::entity::blog_post::{self, Entity as BlogPostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

pub type PostgresPostRepository = PostgresBaseRepository<BlogPostEntity>;

/// `jane@example.com` -> `j***@example.com`, for logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let email = email.trim().to_lowercase();
        tracing::debug!(user_email = %mask_email(&email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<BlogPost>, RepoError> {
        let result = BlogPostEntity::find()
            .filter(blog_post::Column::UserId.eq(user_id))
            .order_by_desc(blog_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
