//! Saved-post handlers. Every route is scoped to the caller's own posts.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::{PostFilter, PostStatus};
use scribe_shared::ApiResponse;
use scribe_shared::dto::{CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn filter_from(query: ListPostsQuery) -> AppResult<PostFilter> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<PostStatus>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
    };

    Ok(PostFilter {
        status,
        search: query.search.filter(|s| !s.trim().is_empty()),
    })
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let filter = filter_from(query.into_inner())?;
    let posts = state.posts_for(identity.user_id).list(&filter).await?;

    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts_for(identity.user_id)
        .insert(body.into_inner())
        .await?;

    tracing::info!(
        post_id = %post.id,
        user_id = %identity.user_id,
        status = %post.status,
        "Post saved"
    );

    Ok(HttpResponse::Created().json(ApiResponse::ok(PostResponse::from(post))))
}

/// GET /api/posts/stats
pub async fn post_stats(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let stats = state
        .posts_for(identity.user_id)
        .stats(chrono::Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts_for(identity.user_id)
        .select(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(post))))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts_for(identity.user_id)
        .update(path.into_inner(), body.into_inner())
        .await?;

    tracing::info!(post_id = %post.id, status = %post.status, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        PostResponse::from(post),
        "Post updated",
    )))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts_for(identity.user_id).delete(id).await?;

    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
