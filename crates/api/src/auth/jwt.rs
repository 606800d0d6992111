//! Access/refresh token issuance and verification.
//!
//! Both token classes are HS256-signed JWTs, but they are signed with
//! DISTINCT secrets and carry a `typ` claim. Verification rejects a token
//! whose declared `typ` does not match the expected use, so the two classes
//! are never interchangeable. Only SHA-256 fingerprints of issued tokens
//! are stored server-side.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use eventhubble_core::types::DbId;

/// The `typ` claim value carried by access tokens.
pub const TOKEN_TYPE_ACCESS: &str = "access";
/// The `typ` claim value carried by refresh tokens.
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub email: String,
    pub role: String,
    pub full_name: String,
    /// Token class discriminator (`"access"`).
    pub typ: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Claims embedded in every refresh token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Token class discriminator (`"refresh"`).
    pub typ: String,
    /// Unique token identifier (UUID v4); makes every issued token distinct.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Configuration for token issuance and verification.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub access_secret: String,
    /// HMAC-SHA256 secret for refresh tokens. Distinct from the access
    /// secret so the two token classes can never validate against each
    /// other's key.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 30).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 30;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                     | Default            |
    /// |-----------------------------|--------------------|
    /// | `JWT_ACCESS_SECRET`         | dev value (logged) |
    /// | `JWT_REFRESH_SECRET`        | dev value (logged) |
    /// | `ACCESS_TOKEN_EXPIRY_MINS`  | `60`               |
    /// | `REFRESH_TOKEN_EXPIRY_DAYS` | `30`               |
    ///
    /// Missing secrets fall back to development values with a WARN rather
    /// than aborting startup; everything except the database connection
    /// degrades instead of crashing.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("JWT_ACCESS_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_ACCESS_SECRET not set; using development secret");
            "eventhubble-dev-access-secret".to_string()
        });

        let refresh_secret = std::env::var("JWT_REFRESH_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_REFRESH_SECRET not set; using development secret");
            "eventhubble-dev-refresh-secret".to_string()
        });

        let access_token_expiry_mins: i64 = std::env::var("ACCESS_TOKEN_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("ACCESS_TOKEN_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("REFRESH_TOKEN_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("REFRESH_TOKEN_EXPIRY_DAYS must be a valid i64");

        Self {
            access_secret,
            refresh_secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// Issue an access token for the given user projection.
pub fn issue_access_token(
    user_id: DbId,
    email: &str,
    role: &str,
    full_name: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = AccessClaims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        full_name: full_name.to_string(),
        typ: TOKEN_TYPE_ACCESS.to_string(),
        iat: now,
        exp: now + config.access_token_expiry_mins * 60,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.access_secret.as_bytes()),
    )
}

/// Issue a refresh token for the given user.
///
/// The `jti` claim (UUID v4) makes every issued token distinct, so rotation
/// always produces a new fingerprint.
pub fn issue_refresh_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = RefreshClaims {
        sub: user_id,
        typ: TOKEN_TYPE_REFRESH.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now,
        exp: now + config.refresh_token_expiry_days * 24 * 60 * 60,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_secret.as_bytes()),
    )
}

/// Verify an access token. Returns `None` on ANY failure -- bad signature,
/// expiry, malformed token, or a `typ` other than `"access"` (e.g. a
/// refresh token presented as an access token). Callers must null-check.
pub fn verify_access_token(token: &str, config: &JwtConfig) -> Option<AccessClaims> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.access_secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .ok()?;

    (data.claims.typ == TOKEN_TYPE_ACCESS).then_some(data.claims)
}

/// Verify a refresh token. Same contract as [`verify_access_token`] but
/// against the refresh secret and `typ == "refresh"`.
pub fn verify_refresh_token(token: &str, config: &JwtConfig) -> Option<RefreshClaims> {
    let data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.refresh_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    (data.claims.typ == TOKEN_TYPE_REFRESH).then_some(data.claims)
}

/// Compute the SHA-256 hex fingerprint of a token for at-rest storage.
///
/// Sessions store only this digest; a database leak does not expose usable
/// tokens.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with known secrets.
    fn test_config() -> JwtConfig {
        JwtConfig {
            access_secret: "test-access-secret-long-enough-for-hmac".to_string(),
            refresh_secret: "test-refresh-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 30,
        }
    }

    #[test]
    fn issue_and_verify_access_token() {
        let config = test_config();
        let token = issue_access_token(42, "admin@eventhubble.com", "admin", "Site Admin", &config)
            .expect("token generation should succeed");

        let claims = verify_access_token(&token, &config).expect("token should verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "admin@eventhubble.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.typ, "access");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn issue_and_verify_refresh_token() {
        let config = test_config();
        let token = issue_refresh_token(7, &config).expect("token generation should succeed");

        let claims = verify_refresh_token(&token, &config).expect("token should verify");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.typ, "refresh");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn token_classes_are_not_interchangeable() {
        let config = test_config();

        // A refresh token must never verify as an access token, and vice
        // versa: the secrets differ AND the typ claim differs.
        let refresh = issue_refresh_token(1, &config).expect("generation should succeed");
        assert!(verify_access_token(&refresh, &config).is_none());

        let access = issue_access_token(1, "a@b.c", "viewer", "A", &config)
            .expect("generation should succeed");
        assert!(verify_refresh_token(&access, &config).is_none());
    }

    #[test]
    fn wrong_typ_with_right_secret_is_rejected() {
        let config = test_config();

        // Sign access-shaped claims carrying typ="refresh" with the ACCESS
        // secret: the signature checks out but the typ claim must still
        // reject it.
        let now = chrono::Utc::now().timestamp();
        let claims = AccessClaims {
            sub: 1,
            email: "a@b.c".to_string(),
            role: "viewer".to_string(),
            full_name: "A".to_string(),
            typ: TOKEN_TYPE_REFRESH.to_string(),
            iat: now,
            exp: now + 3600,
        };
        let forged = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.access_secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let data = decode::<AccessClaims>(
            &forged,
            &DecodingKey::from_secret(config.access_secret.as_bytes()),
            &Validation::default(),
        );
        assert!(data.is_ok(), "sanity: signature itself is valid");
        assert!(verify_access_token(&forged, &config).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();

        // Manually create an already-expired token, well past the default
        // 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = AccessClaims {
            sub: 1,
            email: "a@b.c".to_string(),
            role: "viewer".to_string(),
            full_name: "A".to_string(),
            typ: TOKEN_TYPE_ACCESS.to_string(),
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.access_secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(verify_access_token(&token, &config).is_none());
    }

    #[test]
    fn verification_never_panics_on_garbage() {
        let config = test_config();
        assert!(verify_access_token("", &config).is_none());
        assert!(verify_access_token("not.a.jwt", &config).is_none());
        assert!(verify_refresh_token("garbage", &config).is_none());
    }

    #[test]
    fn fingerprint_is_stable_and_hex() {
        let token = "some.jwt.token";
        let a = token_fingerprint(token);
        let b = token_fingerprint(token);
        assert_eq!(a, b, "fingerprint of the same token must be stable");
        assert_eq!(a.len(), 64);

        assert_ne!(a, token_fingerprint("other.jwt.token"));
    }

    #[test]
    fn refresh_tokens_are_unique_per_issue() {
        let config = test_config();
        let t1 = issue_refresh_token(1, &config).expect("generation should succeed");
        let t2 = issue_refresh_token(1, &config).expect("generation should succeed");
        // jti differs, so rotation always produces a new fingerprint.
        assert_ne!(token_fingerprint(&t1), token_fingerprint(&t2));
    }
}
