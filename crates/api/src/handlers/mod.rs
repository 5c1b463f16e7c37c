//! Request handlers.
//!
//! Handlers delegate to the repositories in `rydeline_db` and map errors
//! via [`AppError`](crate::error::AppError).

pub mod users;
