//! Authentication middleware extractors.
//!
//! - [`auth::CurrentUser`] -- resolves the authenticated user from the
//!   session token (cookie or bearer header).

pub mod auth;
