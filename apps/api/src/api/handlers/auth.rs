use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::jwt::create_token;
use crate::auth::password::{check_strength, hash_password_blocking, verify_password_blocking};
use crate::domain::repositories::{RepositoryError, User};
use crate::domain::user::Email;

/// Request body for registering a catalog administrator
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token for the catalog write routes
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;
    check_strength(&req.password).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let password_hash = hash_password_blocking(req.password)
        .await
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash,
        full_name: req.full_name,
        is_active: true,
    };

    let user_id = state.users.create(user).await.map_err(|e| match e {
        RepositoryError::UniqueViolation(_) => ApiError::bad_request("Email already registered"),
        other => ApiError::from(other),
    })?;
    tracing::info!(%user_id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Exchange email and password for a bearer token
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !user.is_active {
        return Err(ApiError::unauthorized("Account is disabled"));
    }

    let valid = verify_password_blocking(req.password, user.password_hash.clone())
        .await
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    if !valid {
        tracing::warn!(email = %email, "failed login attempt");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = create_token(user.id, &state.jwt_secret)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
    }))
}
