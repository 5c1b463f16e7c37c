//! Session-authentication extractor for Axum handlers.
//!
//! Runs the full gate sequence on every extraction: token presence,
//! revocation lookup, signature/expiry verification, subject resolution.
//! Each step is a hard gate; the first failure rejects the request with a
//! uniform 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use rydeline_db::models::user::User;
use rydeline_db::repositories::{RevokedTokenRepo, UserRepo};

use crate::auth::cookie::session_token;
use crate::auth::jwt::verify_session_token;
use crate::auth::AuthError;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the session token.
///
/// Use as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn profile(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
///     Json(user.into())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AuthError::MissingToken)?;

        // Revocation is checked before the signature: a blacklisted token
        // must never reach verification.
        let cutoff = Utc::now() - Duration::hours(state.config.jwt.session_expiry_hours);
        if RevokedTokenRepo::contains(&state.pool, &token, cutoff).await? {
            return Err(AuthError::RevokedToken.into());
        }

        let claims = verify_session_token(&token, &state.config.jwt)?;

        // A deleted user must not authenticate even with a structurally
        // valid token.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        Ok(CurrentUser(user))
    }
}
