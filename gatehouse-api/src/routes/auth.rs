/// Login endpoint
///
/// # Endpoints
///
/// - `POST /login` - Authenticate and receive a bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use gatehouse_shared::auth::{jwt, password};
use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token, valid for 24 hours
    pub token: String,
}

/// Login handler
///
/// Looks up the account by email and verifies the password against the
/// stored digest. On success, issues a token embedding the account's ID
/// and elevated-privilege flag.
///
/// An unknown email and a wrong password produce the identical response;
/// the handler must not reveal which emails are registered.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "hunter2-but-longer" }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Invalid email or password (single indistinguishable shape)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let account = state
        .directory
        .find_by_email(&req.email)
        .await
        .ok_or(ApiError::InvalidCredentials)?;

    // verify_password absorbs malformed digests as a mismatch, so every
    // failure lands on the same error.
    if !password::verify_password(&req.password, &account.password_hash) {
        tracing::debug!(account_id = %account.uuid, "Login rejected: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let claims = jwt::Claims::new(account.uuid, account.is_adm);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(account_id = %account.uuid, "Login succeeded");

    Ok(Json(LoginResponse { token }))
}
