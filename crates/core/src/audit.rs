//! Audit trail constants and snapshot redaction.
//!
//! Lives in `core` (zero internal deps) so both the repository layer and
//! the API server use the same action vocabulary.

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for audit log entries.
pub mod action_types {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const PASSWORD_RESET: &str = "password_reset";
}

// ---------------------------------------------------------------------------
// Sensitive field redaction
// ---------------------------------------------------------------------------

/// Fields redacted from before/after snapshots before storage.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "password_hash",
    "token",
    "secret",
    "access_token",
    "refresh_token",
    "access_token_hash",
    "refresh_token_hash",
    "authorization",
    "credential",
];

/// Redact sensitive fields from a JSON value, recursing into objects and
/// arrays. Any key containing one of [`SENSITIVE_FIELDS`] (case-insensitive)
/// has its value replaced with `"[REDACTED]"`.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let lower_key = key.to_lowercase();
                if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                    redacted.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_password_hash_in_snapshot() {
        let snapshot = json!({
            "email": "user@example.com",
            "password_hash": "$argon2id$v=19$...",
        });

        let redacted = redact_sensitive_fields(&snapshot);
        assert_eq!(redacted["email"], "user@example.com");
        assert_eq!(redacted["password_hash"], "[REDACTED]");
    }

    #[test]
    fn redacts_nested_objects() {
        let snapshot = json!({
            "user": { "refresh_token_hash": "abc123" },
            "items": [{ "secret": "x" }, { "name": "ok" }],
        });

        let redacted = redact_sensitive_fields(&snapshot);
        assert_eq!(redacted["user"]["refresh_token_hash"], "[REDACTED]");
        assert_eq!(redacted["items"][0]["secret"], "[REDACTED]");
        assert_eq!(redacted["items"][1]["name"], "ok");
    }

    #[test]
    fn key_match_is_case_insensitive() {
        let snapshot = json!({ "Password": "hunter2" });
        let redacted = redact_sensitive_fields(&snapshot);
        assert_eq!(redacted["Password"], "[REDACTED]");
    }

    #[test]
    fn scalars_pass_through() {
        let value = json!(42);
        assert_eq!(redact_sensitive_fields(&value), json!(42));
    }
}
