use crate::auth::validate_access_token;
use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use roster_common::models::auth::Claims;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Extractor that validates a JWT Bearer token and provides the claims.
/// Handlers that take an `AuthUser` argument reject unauthenticated
/// requests before any of their own code runs.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The authenticated user's id, parsed from the token subject. A subject
    /// that is not a UUID is treated like any other invalid token.
    pub fn user_id(&self) -> Result<Uuid, Response> {
        self.0.sub.parse::<Uuid>().map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid or expired token"})),
            )
                .into_response()
        })
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        // Absent header and a non-Bearer scheme get the same answer
        let token = match auth_header.and_then(|v| v.strip_prefix("Bearer ")) {
            Some(t) => t,
            None => {
                return Err((
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": "Authentication required"})),
                )
                    .into_response())
            }
        };

        // Expired, malformed and wrongly-signed tokens are not distinguished
        match validate_access_token(token, &state.config.auth.jwt_secret) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(_) => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid or expired token"})),
            )
                .into_response()),
        }
    }
}
