//! Session-token issuance and verification.
//!
//! Session tokens are HS256-signed JWTs carrying the user id and an
//! absolute expiry 24 hours from issuance (configurable). Verification is
//! stateless: any process holding the shared secret can verify a token
//! issued by another. Revocation is handled separately by the revocation
//! store; this module only covers signature and expiry.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rydeline_core::types::DbId;
use serde::{Deserialize, Serialize};

use super::AuthError;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Default session-token lifetime in hours.
const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Configuration for session-token signing and verification.
///
/// Loaded once at startup and injected through `ServerConfig`; nothing in
/// the codebase reads the secret from the environment after that, so key
/// rotation only ever has to touch this type.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session-token lifetime in hours (default: 24). Doubles as the
    /// retention window for revocation records.
    pub session_expiry_hours: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_SESSION_EXPIRY_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let session_expiry_hours: i64 = std::env::var("JWT_SESSION_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_SESSION_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            session_expiry_hours,
        }
    }
}

/// Issue an HS256 session token for the given user.
pub fn issue_session_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.session_expiry_hours * 3600;

    let claims = Claims {
        sub: user_id,
        exp,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a session token's signature and expiry, returning its [`Claims`].
///
/// Expiry and signature failures are reported as distinct [`AuthError`]
/// variants; a malformed token counts as a signature failure.
pub fn verify_session_token(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    let result = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    );

    match result {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(AuthError::ExpiredToken),
            _ => Err(AuthError::InvalidSignature),
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_hours: 24,
        }
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let config = test_config();
        let token = issue_session_token(42, &config).expect("token issuance should succeed");

        let claims = verify_session_token(&token, &config).expect("verification should succeed");
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_reports_expired() {
        let config = test_config();

        // Manually craft an already-expired token, with a margin well
        // beyond the default 60-second validation leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = verify_session_token(&token, &config);
        assert_matches!(result, Err(AuthError::ExpiredToken));
    }

    #[test]
    fn test_wrong_secret_reports_invalid_signature() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            session_expiry_hours: 24,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            session_expiry_hours: 24,
        };

        let token = issue_session_token(1, &config_a).expect("token issuance should succeed");

        let result = verify_session_token(&token, &config_b);
        assert_matches!(result, Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_garbage_token_reports_invalid_signature() {
        let config = test_config();
        let result = verify_session_token("not.a.jwt", &config);
        assert_matches!(result, Err(AuthError::InvalidSignature));
    }
}
