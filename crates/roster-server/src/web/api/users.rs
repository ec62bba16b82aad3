use crate::auth::{create_access_token, hash_password, verify_password};
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use roster_common::models::auth::User;
use roster_common::validation::{is_valid_email, is_valid_password, MIN_PASSWORD_LEN};
use roster_db::{UserRepo, UserRow};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Client-facing projection of a user row. The password hash stays behind.
fn to_user(row: UserRow) -> User {
    User {
        id: row.id,
        name: row.name,
        email: row.email,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// POST /users/register
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    // Empty strings count as missing
    let (name, email, password) = match (
        req.name.as_deref().filter(|s| !s.is_empty()),
        req.email.as_deref().filter(|s| !s.is_empty()),
        req.password.as_deref().filter(|s| !s.is_empty()),
    ) {
        (Some(n), Some(e), Some(p)) => (n, e, p),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Name, email, and password are required"})),
            )
                .into_response()
        }
    };

    if !is_valid_email(email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid email format"})),
        )
            .into_response();
    }

    if !is_valid_password(password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("Password must be at least {} characters", MIN_PASSWORD_LEN)
            })),
        )
            .into_response();
    }

    match UserRepo::get_by_email(&state.pool, email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Email already in use"})),
            )
                .into_response()
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("DB error during registration: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    }

    let password_hash = match hash_password(password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    let user = match UserRepo::create(&state.pool, Uuid::new_v4(), name, email, &password_hash)
        .await
    {
        Ok(row) => row,
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    let token = match create_access_token(
        &user.id.to_string(),
        &user.email,
        &state.config.auth.jwt_secret,
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create access token: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    (
        StatusCode::CREATED,
        Json(AuthResponse {
            user: to_user(user),
            token,
        }),
    )
        .into_response()
}

/// POST /users/login
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    // A missing field gets the same answer as bad credentials
    let (email, password) = match (req.email.as_deref(), req.password.as_deref()) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid credentials"})),
            )
                .into_response()
        }
    };

    let user = match UserRepo::get_by_email(&state.pool, email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid credentials"})),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("DB error during login: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    match verify_password(password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid credentials"})),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Password verification error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    }

    let token = match create_access_token(
        &user.id.to_string(),
        &user.email,
        &state.config.auth.jwt_secret,
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create access token: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    Json(AuthResponse {
        user: to_user(user),
        token,
    })
    .into_response()
}

/// GET /users/profile
#[tracing::instrument(skip(state, auth))]
pub async fn profile(State(state): State<Arc<AppState>>, auth: AuthUser) -> impl IntoResponse {
    let user_id = match auth.user_id() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match UserRepo::get_by_id(&state.pool, user_id).await {
        Ok(Some(user)) => Json(to_user(user)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "User not found"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to get user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_to_user_drops_password_hash() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(to_user(row)).unwrap();
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["email"], "alice@example.com");
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn test_auth_response_shape() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(AuthResponse {
            user: to_user(row),
            token: "jwt".to_string(),
        })
        .unwrap();
        assert!(value["user"].is_object());
        assert_eq!(value["token"], "jwt");
    }
}
