use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};
use serde_json::json;
use uuid::Uuid;

use scribe_core::domain::{BlogPost, PostStatus, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{blog_post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository, mask_email};

fn post_model(id: Uuid, user_id: Uuid) -> blog_post::Model {
    let now = Utc::now();
    blog_post::Model {
        id,
        user_id,
        title: "Blog Post: Remote Work".to_owned(),
        content: "# Remote Work".to_owned(),
        status: "published".to_owned(),
        topic: "Remote Work".to_owned(),
        target_audience: "managers".to_owned(),
        tone: "casual".to_owned(),
        word_count: 800,
        seo_keywords: json!(["remote", "productivity"]),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id_maps_columns() {
    let post_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, user_id)]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let post: BlogPost = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.user_id, user_id);
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.word_count, 800);
    assert_eq!(post.seo_keywords, vec!["remote", "productivity"]);
}

#[test]
fn test_unreadable_columns_fall_back() {
    let mut model = post_model(Uuid::new_v4(), Uuid::new_v4());
    model.status = "archived".to_owned();
    model.word_count = -1;
    model.seo_keywords = json!({"not": "a list"});

    let post = BlogPost::from(model);

    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.word_count, 0);
    assert!(post.seo_keywords.is_empty());
}

#[tokio::test]
async fn test_save_inserts_when_missing() {
    let model = post_model(Uuid::new_v4(), Uuid::new_v4());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![], vec![model.clone()]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let saved = repo.save(BlogPost::from(model.clone())).await.unwrap();

    assert_eq!(saved.id, model.id);
    assert_eq!(saved.title, model.title);
}

#[tokio::test]
async fn test_find_by_user_id_returns_all_rows() {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            post_model(Uuid::new_v4(), user_id),
            post_model(Uuid::new_v4(), user_id),
        ]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_by_user_id(user_id).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.user_id == user_id));
}

#[tokio::test]
async fn test_delete_without_rows_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        BaseRepository::<BlogPost, Uuid>::delete(&repo, Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_dropped_connection_is_reported_as_connection_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        ))])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.find_by_user_id(Uuid::new_v4()).await,
        Err(RepoError::Connection(_))
    ));
}

#[tokio::test]
async fn test_find_user_by_email() {
    let now = Utc::now();
    let model = user::Model {
        id: Uuid::new_v4(),
        email: "writer@example.com".to_owned(),
        name: Some("Writer".to_owned()),
        password_hash: "hash".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model.clone()]])
        .into_connection();
    let repo = PostgresUserRepository::new(db);

    let found: User = repo
        .find_by_email("Writer@Example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id, model.id);
    assert_eq!(found.name.as_deref(), Some("Writer"));
}

#[test]
fn test_mask_email() {
    assert_eq!(mask_email("jane@example.com"), "j***@example.com");
    assert_eq!(mask_email("j@example.com"), "***@example.com");
    assert_eq!(mask_email("nobody"), "***");
}
