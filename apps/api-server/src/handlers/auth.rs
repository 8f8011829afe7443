//! Authentication handlers.

use actix_web::{HttpResponse, web};

use scribe_core::domain::User;
use scribe_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

fn token_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state.tokens.generate_token(user.id, &user.email)?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(state.tokens.expiration_seconds()).unwrap_or(0),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if state.users.find_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = state.passwords.hash(&req.password)?;
    let user = state
        .users
        .save(User::new(email.to_string(), req.name, password_hash))
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(token_response(&state, &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(token_response(&state, &user)?))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(identity: Identity) -> HttpResponse {
    tracing::debug!(user_id = %identity.user_id, "User signed out");
    HttpResponse::NoContent().finish()
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id.to_string(),
        email: user.email,
        name: user.name,
        created_at: user.created_at.to_rfc3339(),
    }))
}
