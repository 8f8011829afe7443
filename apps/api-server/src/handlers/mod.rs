//! HTTP handlers and route configuration.

mod auth;
mod generate;
mod health;
mod plans;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| AppError::NotFound(err.to_string()).into());

    cfg.service(
        web::scope("/api")
            .app_data(json_config)
            .app_data(query_config)
            .app_data(path_config)
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/plans", web::get().to(plans::list_plans))
            .route("/demo-blog", web::post().to(generate::demo_blog))
            .route("/generate-blog", web::post().to(generate::generate_blog))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            // Owner-scoped routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/stats", web::get().to(posts::post_stats))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test};
    use async_trait::async_trait;
    use chrono::DateTime;
    use serde_json::{Value, json};

    use scribe_core::ProviderAdapter;
    use scribe_core::domain::{PostStatus, User};
    use scribe_core::ports::{CompletionError, CompletionRequest, ProviderKind, TextCompletion};
    use scribe_shared::dto::{AuthResponse, PostResponse};
    use scribe_shared::{ApiResponse, GenerationForm, GenerationFlow, GenerationMode, GenerationResult};

    use super::*;
    use crate::state::AppState;

    struct CountingBackend {
        answer: Result<String, CompletionError>,
        calls: AtomicUsize,
    }

    impl CountingBackend {
        fn new(answer: Result<String, CompletionError>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextCompletion for CountingBackend {
        fn provider(&self) -> ProviderKind {
            ProviderKind::Gemini
        }

        async fn complete(
            &self,
            _api_key: &str,
            _request: &CompletionRequest,
        ) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    fn state_with(backend: Arc<CountingBackend>, api_key: Option<&str>) -> AppState {
        AppState::for_tests(ProviderAdapter::new(
            backend,
            api_key.map(str::to_string),
        ))
    }

    fn demo_state() -> AppState {
        state_with(CountingBackend::new(Ok(String::new())), None)
    }

    async fn signed_in(state: &AppState, email: &str) -> String {
        let user = state
            .users
            .save(User::new(email.to_string(), None, "unused".to_string()))
            .await
            .unwrap();
        let token = state.tokens.generate_token(user.id, &user.email).unwrap();
        format!("Bearer {token}")
    }

    #[actix_rt::test]
    async fn test_demo_generation_short_form() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(demo_state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/demo-blog")
            .set_json(json!({
                "topic": "Remote Work Benefits",
                "tone": "casual",
                "wordCount": 300,
                "keywords": ["remote", "productivity"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: GenerationResult = test::read_body_json(resp).await;
        assert!(body.success);
        assert_eq!(body.is_demo, Some(true));
        let content = body.content.unwrap();
        assert!(content.contains("Remote Work Benefits"));
        assert!(!content.contains("Deep Dive Analysis"));
    }

    #[actix_rt::test]
    async fn test_ai_generation_without_key_fails_before_calling_out() {
        let backend = CountingBackend::new(Ok("unused".to_string()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(backend.clone(), None)))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate-blog")
            .set_json(json!({ "topic": "Remote Work Benefits" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: GenerationResult = test::read_body_json(resp).await;
        assert!(!body.success);
        assert!(body.error.unwrap().contains("not configured"));
        assert!(body.hint.unwrap().contains("GEMINI_API_KEY"));
        assert_eq!(backend.calls(), 0);
    }

    #[actix_rt::test]
    async fn test_ai_generation_success_and_quota_failure() {
        let ok = CountingBackend::new(Ok("# Generated\n\nBody".to_string()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(ok.clone(), Some("key"))))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/generate-blog")
            .set_json(json!({ "topic": "Rust", "wordCount": "800" }))
            .to_request();
        let body: GenerationResult = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, GenerationResult::generated("# Generated\n\nBody"));
        assert_eq!(ok.calls(), 1);

        let quota = CountingBackend::new(Err(CompletionError::Provider {
            status: 429,
            message: "RESOURCE_EXHAUSTED: You exceeded your current quota".to_string(),
        }));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(quota.clone(), Some("key"))))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/generate-blog")
            .set_json(json!({ "topic": "Rust" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: GenerationResult = test::read_body_json(resp).await;
        assert!(body.error.unwrap().contains("quota"));
        assert_eq!(quota.calls(), 1);
    }

    #[actix_rt::test]
    async fn test_malformed_generation_requests_use_envelope() {
        let backend = CountingBackend::new(Ok("unused".to_string()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(backend.clone(), Some("key"))))
                .configure(configure_routes),
        )
        .await;

        for (uri, payload) in [
            ("/api/generate-blog", "{not json"),
            ("/api/generate-blog", r#"{"topic": "   "}"#),
            ("/api/demo-blog", r#"{"tone": "casual"}"#),
        ] {
            let req = test::TestRequest::post()
                .uri(uri)
                .insert_header(("content-type", "application/json"))
                .set_payload(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{payload}");
            let body: GenerationResult = test::read_body_json(resp).await;
            assert!(!body.success);
            assert!(body.error.is_some());
        }
        assert_eq!(backend.calls(), 0);
    }

    #[actix_rt::test]
    async fn test_save_draft_after_generation() {
        let state = demo_state();
        let auth = signed_in(&state, "writer@example.com").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let mut flow = GenerationFlow::new(GenerationForm {
            topic: "Remote Work Benefits".to_string(),
            keywords: " remote , productivity,, ".to_string(),
            ..GenerationForm::default()
        });
        let request = flow.submit(GenerationMode::Demo).unwrap();
        let req = test::TestRequest::post()
            .uri(GenerationMode::Demo.endpoint())
            .set_json(&request)
            .to_request();
        let result: GenerationResult = test::call_and_read_body_json(&app, req).await;
        flow.receive(result).unwrap();

        let draft = flow.save(PostStatus::Draft).unwrap();
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((AUTHORIZATION, auth.clone()))
            .set_json(&draft)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/posts")
            .insert_header((AUTHORIZATION, auth))
            .to_request();
        let listed: ApiResponse<Vec<PostResponse>> =
            test::call_and_read_body_json(&app, req).await;
        let posts = listed.data.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].status, PostStatus::Draft);
        assert_eq!(posts[0].title, "Blog Post: Remote Work Benefits");
        assert_eq!(posts[0].seo_keywords, vec!["remote", "productivity"]);
    }

    #[actix_rt::test]
    async fn test_edit_round_trip_and_ownership() {
        let state = demo_state();
        let owner = signed_in(&state, "owner@example.com").await;
        let stranger = signed_in(&state, "stranger@example.com").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((AUTHORIZATION, owner.clone()))
            .set_json(json!({ "title": "Blog Post: Rust", "content": "# Rust", "tone": "technical" }))
            .to_request();
        let created: ApiResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
        let created = created.data.unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header((AUTHORIZATION, owner.clone()))
            .set_json(json!({ "content": "# Rust, edited", "status": "published" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header((AUTHORIZATION, owner.clone()))
            .to_request();
        let reloaded: ApiResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
        let reloaded = reloaded.data.unwrap();

        assert_eq!(reloaded.content, "# Rust, edited");
        assert_eq!(reloaded.status, PostStatus::Published);
        assert_eq!(reloaded.created_at, created.created_at);
        let before = DateTime::parse_from_rfc3339(&created.updated_at).unwrap();
        let after = DateTime::parse_from_rfc3339(&reloaded.updated_at).unwrap();
        assert!(after > before);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header((AUTHORIZATION, stranger.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header((AUTHORIZATION, stranger))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", created.id))
            .insert_header((AUTHORIZATION, owner))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }

    #[actix_rt::test]
    async fn test_posts_require_bearer_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(demo_state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/posts/stats")
            .insert_header((AUTHORIZATION, "Bearer not-a-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_stats_and_filters() {
        let state = demo_state();
        let auth = signed_in(&state, "writer@example.com").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        for (title, status, words) in [
            ("Rust in production", "published", 800),
            ("Gardening tips", "draft", 300),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .insert_header((AUTHORIZATION, auth.clone()))
                .set_json(json!({
                    "title": title,
                    "content": "body",
                    "status": status,
                    "tone": "casual",
                    "wordCount": words
                }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/api/posts?status=published&search=RUST")
            .insert_header((AUTHORIZATION, auth.clone()))
            .to_request();
        let listed: ApiResponse<Vec<PostResponse>> =
            test::call_and_read_body_json(&app, req).await;
        let titles: Vec<String> = listed.data.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Rust in production"]);

        let req = test::TestRequest::get()
            .uri("/api/posts/stats")
            .insert_header((AUTHORIZATION, auth))
            .to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["data"]["total"], 2);
        assert_eq!(stats["data"]["published"], 1);
        assert_eq!(stats["data"]["totalWords"], 1100);
        assert_eq!(stats["data"]["averageWords"], 550);
        assert_eq!(stats["data"]["byTone"]["casual"], 2);
    }

    #[actix_rt::test]
    async fn test_register_login_me() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(demo_state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "email": "New@Example.com",
                "password": "long-enough",
                "name": "New Writer"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "new@example.com", "password": "long-enough" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "new@example.com", "password": "wrong-password" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "new@example.com", "password": "long-enough" }))
            .to_request();
        let login: AuthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(login.token_type, "Bearer");

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((AUTHORIZATION, format!("Bearer {}", login.access_token)))
            .to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["email"], "new@example.com");
        assert_eq!(me["name"], "New Writer");
    }

    #[actix_rt::test]
    async fn test_health_and_plans() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(demo_state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["status"], "ok");
        assert_eq!(health["aiConfigured"], false);

        let req = test::TestRequest::get().uri("/api/plans").to_request();
        let plans: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plans["data"].as_array().map(Vec::len), Some(3));
    }
}
