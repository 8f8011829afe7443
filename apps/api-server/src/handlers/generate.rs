//! Blog generation endpoints.
//!
//! Both routes answer with the [`GenerationResult`] envelope: 200 on success,
//! 500 with a readable `error` on every failure.

use actix_web::{HttpResponse, web};

use scribe_core::domain::GenerationRequest;
use scribe_core::{GenerationError, template};
use scribe_shared::GenerationResult;

use crate::state::AppState;

/// Decode and validate a request body.
///
/// Decoding is done here rather than through `web::Json` so that malformed
/// bodies still get the envelope.
fn parse_request(body: &[u8]) -> Result<GenerationRequest, GenerationError> {
    let request: GenerationRequest = serde_json::from_slice(body)
        .map_err(|e| GenerationError::MalformedRequest(e.to_string()))?;
    request.validate()?;
    Ok(request)
}

fn failure(err: &GenerationError) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(GenerationResult::failed(err.to_string()).with_hint(err.remediation()))
}

/// POST /api/demo-blog
pub async fn demo_blog(body: web::Bytes) -> HttpResponse {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(kind = err.kind().as_str(), "Rejected demo generation request");
            return failure(&err);
        }
    };

    let content = template::generate_for(&request);
    tracing::info!(
        tone = %request.tone,
        word_count = request.word_count,
        "Generated demo blog post"
    );

    HttpResponse::Ok().json(GenerationResult::demo(content))
}

/// POST /api/generate-blog
pub async fn generate_blog(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let provider = state.generator.provider();

    let result = match parse_request(&body) {
        Ok(request) => state.generator.complete(&request).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(content) => {
            tracing::info!(provider = %provider, chars = content.len(), "Generated blog post");
            HttpResponse::Ok().json(GenerationResult::generated(content))
        }
        Err(err) => {
            tracing::warn!(
                provider = %provider,
                kind = err.kind().as_str(),
                "Blog generation failed"
            );
            failure(&err)
        }
    }
}
