//! Handlers for the `/users` resource (register, login, profile, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use rydeline_core::error::CoreError;
use rydeline_core::validation::field_violations;
use rydeline_db::models::user::{CreateUser, UserResponse};
use rydeline_db::repositories::{RevokedTokenRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::cookie::{build_auth_cookie, build_clear_cookie, session_token};
use crate::auth::jwt::issue_session_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthError;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "First name must be at least 3 characters long"))]
    pub firstname: String,
    #[validate(length(min = 3, message = "Last name must be at least 3 characters long"))]
    pub lastname: Option<String>,
    #[validate(
        email(message = "Invalid Email"),
        length(min = 5, message = "Email must be at least 5 characters long")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid Email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Response body for `POST /users/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users/register
///
/// Create an account: validate the body, hash the password, insert the
/// user, and issue a session token.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    input
        .validate()
        .map_err(|e| AppError::InvalidFields(field_violations(&e)))?;

    // Argon2 is CPU-bound; keep it off the async executor.
    let password = input.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CoreError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| CoreError::Internal(format!("password hashing error: {e}")))?;

    let create_dto = CreateUser {
        first_name: input.firstname,
        last_name: input.lastname,
        email: input.email,
        password_hash,
    };

    let user = UserRepo::create(&state.pool, &create_dto)
        .await
        .map_err(|e| {
            if is_duplicate_email(&e) {
                AppError::Core(CoreError::Conflict("Email is already registered".into()))
            } else {
                AppError::Database(e)
            }
        })?;

    let token = issue_session_token(user.id, &state.config.jwt)
        .map_err(|e| CoreError::Internal(format!("token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/v1/users/login
///
/// Authenticate with email + password. Sets the session cookie and returns
/// the token in the body as well.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::InvalidFields(field_violations(&e)))?;

    // Unknown email and wrong password are deliberately indistinguishable
    // to the caller.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or(AuthError::BadCredentials)?;

    let password = input.password;
    let stored_digest = user.password_hash.clone();
    let password_valid =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_digest))
            .await
            .map_err(|e| CoreError::Internal(format!("verification task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("stored digest is malformed: {e}")))?;

    if !password_valid {
        return Err(AuthError::BadCredentials.into());
    }

    let token = issue_session_token(user.id, &state.config.jwt)
        .map_err(|e| CoreError::Internal(format!("token generation error: {e}")))?;

    let cookie = build_auth_cookie(&token, state.config.jwt.session_expiry_hours * 3600);

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// GET /api/v1/users/profile
///
/// Return the authenticated user's profile.
pub async fn profile(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

/// POST /api/v1/users/logout
///
/// Blacklist the presented token and clear the session cookie. The token
/// is not verified first: whatever credential the client was holding must
/// stop working, valid or not.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let token = session_token(&headers).ok_or(AuthError::MissingToken)?;

    RevokedTokenRepo::insert(&state.pool, &token).await?;

    Ok((
        AppendHeaders([(SET_COOKIE, build_clear_cookie())]),
        Json(LogoutResponse {
            message: "User logged out successfully",
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// True iff the error is a unique violation on the users email constraint.
fn is_duplicate_email(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_users_email")
    )
}
