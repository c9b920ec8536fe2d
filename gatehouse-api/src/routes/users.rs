/// Account management endpoints
///
/// # Endpoints
///
/// - `POST /users` - Register a new account (public)
/// - `GET /users` - List all accounts (elevated only)
/// - `GET /users/profile` - Own profile (any authenticated caller)
/// - `PATCH /users/:id` - Update name/email (self or elevated)
/// - `DELETE /users/:id` - Delete account (self or elevated)
///
/// All protected handlers receive the request's [`Caller`] from the
/// bearer-auth middleware and run it through [`access::authorize`] before
/// touching the directory.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use gatehouse_shared::{
    auth::{
        access::{self, Caller},
        password,
    },
    models::account::{AccountChanges, NewAccount, Profile},
};
use serde::Deserialize;
use uuid::Uuid;

/// Registration request
///
/// Field presence is the only validation: serde rejects a body missing
/// email, name, or password. `isAdm` defaults to false when omitted.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Plaintext password, hashed before it reaches the directory
    pub password: String,

    /// Elevated-privilege flag
    #[serde(rename = "isAdm", default)]
    pub is_adm: bool,
}

/// Registration handler
///
/// The duplicate-email check runs before hashing so a taken email does
/// not cost an Argon2 derivation. The directory re-checks uniqueness
/// under its write lock, which is what actually holds the invariant when
/// two registrations race.
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "name": "Ada",
///   "password": "hunter2-but-longer",
///   "isAdm": false
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    if state.directory.find_by_email(&req.email).await.is_some() {
        return Err(ApiError::Conflict("E-mail already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let account = state
        .directory
        .create(NewAccount {
            name: req.name,
            email: req.email,
            password_hash,
            is_adm: req.is_adm,
        })
        .await?;

    tracing::info!(account_id = %account.uuid, "Account registered");

    Ok((StatusCode::CREATED, Json(Profile::from(&account))))
}

/// Lists every account (elevated callers only)
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not elevated
pub async fn list_accounts(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<Vec<Profile>>> {
    access::authorize(&caller, None)?;

    let profiles = state
        .directory
        .list()
        .await
        .iter()
        .map(Profile::from)
        .collect();

    Ok(Json(profiles))
}

/// Returns the caller's own profile
///
/// # Errors
///
/// - `404 Not Found`: The account was deleted after the token was issued
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<Profile>> {
    let account = state
        .directory
        .find_by_id(caller.id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Account {} not found", caller.id)))?;

    Ok(Json(Profile::from(&account)))
}

/// Profile update request
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New display name
    pub name: Option<String>,

    /// New email address
    pub email: Option<String>,
}

/// Updates an account's name and/or email (self or elevated)
///
/// Password and privilege flag are not reachable through this path; the
/// directory bumps the update timestamp.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is neither the target nor elevated
/// - `404 Not Found`: No account with this ID
/// - `409 Conflict`: New email already registered to another account
pub async fn update_account(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<Json<Profile>> {
    access::authorize(&caller, Some(id))?;

    let account = state
        .directory
        .update(
            id,
            AccountChanges {
                name: req.name,
                email: req.email,
            },
        )
        .await?;

    Ok(Json(Profile::from(&account)))
}

/// Deletes an account (self or elevated)
///
/// # Errors
///
/// - `403 Forbidden`: Caller is neither the target nor elevated
/// - `404 Not Found`: No account with this ID
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    access::authorize(&caller, Some(id))?;

    state.directory.delete(id).await?;

    tracing::info!(account_id = %id, deleted_by = %caller.id, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}
