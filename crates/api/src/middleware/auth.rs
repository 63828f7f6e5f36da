//! Authentication middleware for protected routes.
//!
//! The API never verifies credentials itself. It extracts a bearer token
//! and hands it to an injected [`TokenVerifier`] - the identity
//! collaborator - which maps it to a user id or rejects it.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use ponmo_shared::types::UserId;

use crate::AppState;

/// Authentication failures reported by a verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token was valid once but has expired.
    #[error("token has expired")]
    Expired,
    /// The token is malformed or not recognized.
    #[error("invalid token")]
    Invalid,
}

/// Identity collaborator: maps a bearer token to a user id.
pub trait TokenVerifier: Send + Sync {
    /// Verifies a token, returning the signed-in user's id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for invalid or expired tokens.
    fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}

/// Verifier accepting a single configured token.
///
/// Development stand-in for a real identity provider: every request
/// presenting the configured token resolves to the same user.
pub struct StaticTokenVerifier {
    token: String,
    user: UserId,
}

impl StaticTokenVerifier {
    /// Creates a verifier accepting exactly `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: UserId::new(),
        }
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        if token == self.token {
            Ok(self.user)
        } else {
            Err(AuthError::Invalid)
        }
    }
}

/// Verifier that accepts anything. Development only.
pub struct AllowAllVerifier;

impl TokenVerifier for AllowAllVerifier {
    fn verify(&self, _token: &str) -> Result<UserId, AuthError> {
        Ok(UserId::from_uuid(Uuid::nil()))
    }
}

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Authentication middleware that validates bearer tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token through the injected verifier
/// 3. Stores the user id in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_token",
                "message": "Authorization header with Bearer token is required"
            })),
        )
            .into_response();
    };

    match state.verifier.verify(token) {
        Ok(user_id) => {
            request.extensions_mut().insert(user_id);
            next.run(request).await
        }
        Err(e) => {
            let (error, message) = match e {
                AuthError::Expired => ("token_expired", "Token has expired"),
                AuthError::Invalid => ("invalid_token", "Invalid or malformed token"),
            };

            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response()
        }
    }
}

/// Extractor for the authenticated user.
///
/// Use this in handlers to get the verified user's id:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl AuthUser {
    /// Returns the authenticated user's id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserId>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}
