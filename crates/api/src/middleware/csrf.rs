//! CSRF double-submit check for state-changing requests.
//!
//! The `csrfToken` cookie (issued at login, readable by the frontend) must
//! be mirrored into the `X-CSRF-Token` header on every non-GET request.
//! Applied to the authenticated route groups; public endpoints are exempt
//! because the client has no CSRF cookie before its first login.

use axum::extract::Request;
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::cookies::{cookie_value, CSRF_COOKIE};
use crate::error::{AppError, AuthError};

/// Header carrying the mirrored CSRF token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Decide whether the request passes the CSRF check.
///
/// Safe methods (GET/HEAD/OPTIONS) always pass. Everything else requires
/// cookie and header to be present and equal.
pub fn check_csrf(method: &Method, headers: &HeaderMap) -> Result<(), AuthError> {
    if *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS {
        return Ok(());
    }

    let cookie = cookie_value(headers, CSRF_COOKIE).ok_or(AuthError::Csrf)?;
    let header = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::Csrf)?;

    if cookie != header {
        return Err(AuthError::Csrf);
    }
    Ok(())
}

/// Middleware enforcing [`check_csrf`] on a route group.
pub async fn require_csrf(request: Request, next: Next) -> Response {
    if let Err(e) = check_csrf(request.method(), request.headers()) {
        return AppError::Auth(e).into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    fn headers(cookie: Option<&str>, header: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(c) = cookie {
            map.insert(COOKIE, HeaderValue::from_str(&format!("csrfToken={c}")).unwrap());
        }
        if let Some(h) = header {
            map.insert(CSRF_HEADER, HeaderValue::from_str(h).unwrap());
        }
        map
    }

    #[test]
    fn safe_methods_always_pass() {
        let empty = HeaderMap::new();
        assert!(check_csrf(&Method::GET, &empty).is_ok());
        assert!(check_csrf(&Method::HEAD, &empty).is_ok());
        assert!(check_csrf(&Method::OPTIONS, &empty).is_ok());
    }

    #[test]
    fn matching_tokens_pass() {
        let headers = headers(Some("tok-123"), Some("tok-123"));
        assert!(check_csrf(&Method::POST, &headers).is_ok());
        assert!(check_csrf(&Method::PUT, &headers).is_ok());
        assert!(check_csrf(&Method::DELETE, &headers).is_ok());
    }

    #[test]
    fn missing_cookie_or_header_fails() {
        assert!(check_csrf(&Method::POST, &headers(None, Some("tok"))).is_err());
        assert!(check_csrf(&Method::POST, &headers(Some("tok"), None)).is_err());
        assert!(check_csrf(&Method::POST, &HeaderMap::new()).is_err());
    }

    #[test]
    fn mismatched_tokens_fail() {
        let headers = headers(Some("tok-a"), Some("tok-b"));
        assert!(check_csrf(&Method::POST, &headers).is_err());
    }
}
