//! Best-effort audit recording for mutating handlers.
//!
//! Handlers call [`record`] after the primary database write succeeds. The
//! insert runs on a spawned task: a failure is logged at WARN and
//! swallowed, so auditing can never fail the request that triggered it.
//! Before/after snapshots pass through sensitive-field redaction before
//! storage.

use eventhubble_core::audit::redact_sensitive_fields;
use eventhubble_core::types::DbId;
use eventhubble_db::models::audit_log::CreateAuditLog;
use eventhubble_db::repositories::AuditRepo;
use eventhubble_db::DbPool;

use crate::middleware::auth::AuthUser;
use crate::middleware::client_meta::ClientMeta;

/// One mutating action to be recorded.
///
/// `before` carries the pre-write snapshot (updates and deletes), `after`
/// the post-write snapshot (creates and updates). Build snapshots with
/// [`snapshot`].
pub struct AuditEntry {
    /// Action verb, one of [`eventhubble_core::audit::action_types`].
    pub action: &'static str,
    pub entity_type: &'static str,
    pub entity_id: Option<DbId>,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
}

/// Serialize a model row into a JSON snapshot for an [`AuditEntry`].
pub fn snapshot<T: serde::Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}

/// Record a mutating action on behalf of `user`. Fire-and-forget.
pub fn record(pool: &DbPool, user: &AuthUser, meta: &ClientMeta, entry: AuditEntry) {
    let create = CreateAuditLog {
        user_id: Some(user.id),
        action: entry.action.to_string(),
        entity_type: Some(entry.entity_type.to_string()),
        entity_id: entry.entity_id,
        before_value: entry.before.as_ref().map(redact_sensitive_fields),
        after_value: entry.after.as_ref().map(redact_sensitive_fields),
        ip_address: meta.ip_address.clone(),
        user_agent: meta.user_agent.clone(),
    };

    let pool = pool.clone();
    tokio::spawn(async move {
        if let Err(e) = AuditRepo::insert(&pool, &create).await {
            tracing::warn!(error = %e, action = %create.action, "Audit log insert failed");
        }
    });
}
