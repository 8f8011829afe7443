//! Pricing plans. Informational only.

use actix_web::HttpResponse;

use scribe_core::domain::PRICING_PLANS;
use scribe_shared::ApiResponse;

/// GET /api/plans
pub async fn list_plans() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(PRICING_PLANS))
}
