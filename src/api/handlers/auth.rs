use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::app::AppState;
use crate::auth::jwt::{issue_token, secret};
use crate::auth::password::{hash_password, verify_password};
use crate::domain::user::{Email, User};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let email = Email::parse(req.email).map_err(ApiError::bad_request)?;

    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to hash password: {e}")))?;

    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash,
        name: req.name,
        created_at: Utc::now(),
    };

    let user_id = state.repositories().users().create(user).await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = Email::parse(req.email).map_err(ApiError::bad_request)?;

    let user = state
        .repositories()
        .users()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let valid = verify_password(&req.password, &user.password_hash)
        .map_err(|e| ApiError::internal_server_error(format!("Password verification failed: {e}")))?;

    if !valid {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = issue_token(user.id, &secret())
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
    }))
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
