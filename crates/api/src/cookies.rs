//! Cookie plumbing for the auth flow.
//!
//! Tokens travel in HTTP-only cookies; the CSRF token cookie is readable by
//! the frontend so it can be mirrored into the `X-CSRF-Token` header.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie holding the short-lived access token (HTTP-only).
pub const ACCESS_COOKIE: &str = "accessToken";
/// Cookie holding the long-lived refresh token (HTTP-only).
pub const REFRESH_COOKIE: &str = "refreshToken";
/// Cookie holding the CSRF token (readable by the frontend).
pub const CSRF_COOKIE: &str = "csrfToken";

/// Extract a cookie value by name from the request headers.
///
/// Handles multiple `Cookie` headers and the standard `name=value; ...`
/// packing within each.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (k, v) = pair.trim().split_once('=')?;
            (k == name).then(|| v.to_string())
        })
        .next()
}

/// Build a `Set-Cookie` value for an auth cookie.
///
/// `max_age_secs` of 0 produces an expired cookie (used to clear on
/// logout). `http_only` is false only for the CSRF cookie.
pub fn set_cookie(
    name: &str,
    value: &str,
    max_age_secs: i64,
    secure: bool,
    http_only: bool,
) -> String {
    let mut cookie = format!("{name}={value}; Path=/; SameSite=Lax; Max-Age={max_age_secs}");
    if http_only {
        cookie.push_str("; HttpOnly");
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a `Set-Cookie` value that clears the named cookie.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    set_cookie(name, "", 0, secure, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_cookie_from_packed_header() {
        let headers = headers_with_cookie("accessToken=abc.def.ghi; refreshToken=jkl; other=1");
        assert_eq!(
            cookie_value(&headers, ACCESS_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(cookie_value(&headers, REFRESH_COOKIE).as_deref(), Some("jkl"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn handles_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("csrfToken=tok"));
        assert_eq!(cookie_value(&headers, CSRF_COOKIE).as_deref(), Some("tok"));
    }

    #[test]
    fn name_match_is_exact() {
        // "accessToken" must not match "accessTokenOld".
        let headers = headers_with_cookie("accessTokenOld=stale");
        assert_eq!(cookie_value(&headers, ACCESS_COOKIE), None);
    }

    #[test]
    fn set_cookie_attributes() {
        let cookie = set_cookie("accessToken", "tok", 3600, true, true);
        assert!(cookie.starts_with("accessToken=tok; "));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[test]
    fn csrf_cookie_is_not_http_only() {
        let cookie = set_cookie("csrfToken", "tok", 3600, false, false);
        assert!(!cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_cookie("refreshToken", false);
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.starts_with("refreshToken=; "));
    }
}
