/// Domain-level errors raised below the HTTP layer.
///
/// The API crate wraps this in its own error type and maps each variant to
/// a response status. Authentication failures have their own enum in the
/// API crate; `CoreError` covers everything else.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A uniqueness or state conflict (e.g. registering an email twice).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure scoped to the current request.
    #[error("Internal error: {0}")]
    Internal(String),
}
