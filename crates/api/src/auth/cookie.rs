//! The session-token cookie and token extraction from requests.
//!
//! Login sets the token in an `HttpOnly` cookie; clients may instead send
//! it as an `Authorization: Bearer` header. Extraction checks the cookie
//! first and falls back to the header -- the authenticator and the logout
//! path share this helper so the precedence stays identical in both.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;

/// Name of the session-token cookie.
pub const SESSION_COOKIE: &str = "token";

/// Build the `Set-Cookie` value issued at login.
pub fn build_auth_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// Build the `Set-Cookie` value that clears the session cookie at logout.
pub fn build_clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session token from a request: `token` cookie first, then
/// `Authorization: Bearer`. Empty values count as absent.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    token_from_cookie(headers).or_else(|| token_from_bearer(headers))
}

fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

fn token_from_bearer(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ")?;
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_token_from_cookie() {
        let headers = headers(&[("cookie", "token=abc123")]);
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_token_from_cookie_among_other_pairs() {
        let headers = headers(&[("cookie", "theme=dark; token=abc123; lang=en")]);
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_token_from_bearer_header() {
        let headers = headers(&[("authorization", "Bearer xyz789")]);
        assert_eq!(session_token(&headers).as_deref(), Some("xyz789"));
    }

    #[test]
    fn test_cookie_takes_precedence_over_header() {
        let headers = headers(&[
            ("cookie", "token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(session_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_empty_cookie_value_falls_back_to_header() {
        let headers = headers(&[
            ("cookie", "token="),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(session_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_missing_token_is_none() {
        let headers = headers(&[("cookie", "theme=dark")]);
        assert_eq!(session_token(&headers), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_authorization_is_ignored() {
        let headers = headers(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let set = build_auth_cookie("abc123", 86400);
        assert!(set.starts_with("token=abc123;"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Max-Age=86400"));

        let clear = build_clear_cookie();
        assert!(clear.starts_with("token=;"));
        assert!(clear.contains("Max-Age=0"));
    }
}
