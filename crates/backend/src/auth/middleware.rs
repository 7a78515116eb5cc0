//! Session middleware and cookie helpers.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use cookie::Cookie;

use crate::error::ApiError;
use crate::AppState;

use super::jwt;
use super::types::{AuthConfig, SessionUser};

/// Middleware function that requires a valid session.
///
/// Use with `axum::middleware::from_fn_with_state`. The authenticated
/// [`SessionUser`] is inserted into the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match extract_session_user(request.headers(), &state.auth_config) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Extract and validate the session user from request headers.
pub fn extract_session_user(
    headers: &HeaderMap,
    config: &AuthConfig,
) -> Result<SessionUser, ApiError> {
    let token = extract_session_token(headers, &config.cookie_name)
        .ok_or_else(|| ApiError::unauthorized("Missing session"))?;

    let claims = jwt::validate_token(config, &token).map_err(|e| {
        tracing::debug!("Session rejected: {}", e);
        ApiError::unauthorized("Invalid or expired session")
    })?;

    Ok(claims.user)
}

/// Session token from the cookie, falling back to a bearer header.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    extract_token_from_cookie(headers, cookie_name).or_else(|| extract_token_from_header(headers))
}

fn extract_token_from_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| Cookie::parse(pair.trim()).ok())
        .find(|cookie| cookie.name() == cookie_name && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string())
}

fn extract_token_from_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Build the `Set-Cookie` value carrying a session token.
pub fn build_session_cookie(config: &AuthConfig, token: &str) -> String {
    let secure = if config.secure_cookies { "; Secure" } else { "" };
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        config.cookie_name, token, config.token_expiration_secs, secure
    )
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &AuthConfig) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::tests::{expired_token, test_config, test_user};
    use axum::http::HeaderValue;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_token_found_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; token=abc.def.ghi; lang=en");
        assert_eq!(
            extract_session_token(&headers, "token").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_bearer_header_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(
            extract_session_token(&headers, "token").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_empty_cookie_treated_as_missing() {
        let headers = headers_with_cookie("token=");
        assert!(extract_session_token(&headers, "token").is_none());
    }

    #[test]
    fn test_valid_session_extracted() {
        let config = test_config();
        let token = jwt::create_token(&config, &test_user()).unwrap();
        let headers = headers_with_cookie(&format!("token={}", token));

        let user = extract_session_user(&headers, &config).expect("should accept session");
        assert_eq!(user, test_user());
    }

    #[test]
    fn test_expired_session_rejected() {
        let config = test_config();
        let headers = headers_with_cookie(&format!("token={}", expired_token(&config)));

        let err = extract_session_user(&headers, &config).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = test_config();
        let cookie = build_session_cookie(&config, "abc");

        assert!(cookie.starts_with("token=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=36000"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_secure_flag_in_production() {
        let mut config = test_config();
        config.secure_cookies = true;
        assert!(build_session_cookie(&config, "abc").contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(&test_config());
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
