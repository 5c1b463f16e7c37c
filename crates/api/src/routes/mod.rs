//! Route tree assembly.

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users/register   register (public)
/// /users/login      login (public)
/// /users/profile    profile (requires auth)
/// /users/logout     logout
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/users", users::router())
}
