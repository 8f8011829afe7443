//! Authentication extractor.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, ResponseError, dev::Payload, http::header, web};
use actix_web::{HttpResponse, http::StatusCode};
use uuid::Uuid;

use scribe_core::ports::{AuthError, TokenClaims};
use scribe_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AuthenticationError(pub AuthError);

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized(),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;

    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    state.tokens.validate_token(token.trim()).map(Identity::from)
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(AuthenticationError))
    }
}
