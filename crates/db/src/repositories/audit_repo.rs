//! Repository for the append-only `audit_logs` table.

use sqlx::PgPool;

use crate::models::audit_log::{AuditLog, AuditLogPage, AuditQuery, CreateAuditLog};
use crate::pagination::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, action, entity_type, entity_id, \
                        before_value, after_value, ip_address, user_agent, created_at";

/// Provides insert and query operations for audit log entries. There are no
/// update or delete operations; entries are immutable.
pub struct AuditRepo;

impl AuditRepo {
    /// Insert a new audit log entry, returning the created row.
    pub async fn insert(pool: &PgPool, input: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs
                (user_id, action, entity_type, entity_id, before_value, after_value, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.before_value)
            .bind(&input.after_value)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Query audit logs with optional filters, newest first.
    pub async fn query(pool: &PgPool, params: &AuditQuery) -> Result<AuditLogPage, sqlx::Error> {
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let filter = "($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::TEXT IS NULL OR action = $2)
               AND ($3::TEXT IS NULL OR entity_type = $3)
               AND ($4::BIGINT IS NULL OR entity_id = $4)
               AND ($5::TIMESTAMPTZ IS NULL OR created_at >= $5)
               AND ($6::TIMESTAMPTZ IS NULL OR created_at <= $6)";

        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE {filter}
             ORDER BY created_at DESC
             LIMIT $7 OFFSET $8"
        );
        let items = sqlx::query_as::<_, AuditLog>(&query)
            .bind(params.user_id)
            .bind(&params.action)
            .bind(&params.entity_type)
            .bind(params.entity_id)
            .bind(params.from)
            .bind(params.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM audit_logs WHERE {filter}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(params.user_id)
            .bind(&params.action)
            .bind(&params.entity_type)
            .bind(params.entity_id)
            .bind(params.from)
            .bind(params.to)
            .fetch_one(pool)
            .await?;

        Ok(AuditLogPage {
            items,
            total: total.0,
        })
    }
}
