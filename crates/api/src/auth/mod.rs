//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session-token issuance and verification.
//! - [`cookie`] -- the `token` cookie and token extraction from requests.

pub mod cookie;
pub mod jwt;
pub mod password;

/// Why a request failed authentication.
///
/// Every variant collapses to a generic 401 at the HTTP boundary; the
/// precise variant is logged for diagnostics, never serialized to the
/// client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No session token in the cookie or `Authorization` header.
    #[error("no session token presented")]
    MissingToken,

    /// The token is on the revocation list.
    #[error("session token has been revoked")]
    RevokedToken,

    /// The token's signature does not verify (or the token is malformed).
    #[error("session token signature is invalid")]
    InvalidSignature,

    /// The token's expiry timestamp has passed.
    #[error("session token has expired")]
    ExpiredToken,

    /// The token verified but its subject no longer resolves to a user.
    #[error("session token subject no longer exists")]
    UnknownSubject,

    /// Email or password did not match at login.
    #[error("email or password did not match")]
    BadCredentials,
}
