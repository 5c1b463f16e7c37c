//! Repository for the `revoked_tokens` table.

use rydeline_core::types::Timestamp;
use sqlx::PgPool;

/// Records session tokens that must no longer be accepted.
///
/// Rows age out after the retention window configured alongside the token
/// lifetime. `contains` applies the window at read time, so a lagging
/// cleanup sweep can never make an expired record read as revoked.
pub struct RevokedTokenRepo;

impl RevokedTokenRepo {
    /// Record a token as revoked with the current timestamp.
    ///
    /// Idempotent: re-revoking an already blacklisted token is success, not
    /// an error -- the intent ("this token must not be accepted again")
    /// already holds.
    pub async fn insert(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO revoked_tokens (token) VALUES ($1)
             ON CONFLICT (token) DO NOTHING",
        )
        .bind(token)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// True iff a revocation record newer than `cutoff` exists for `token`.
    ///
    /// Callers compute `cutoff = now - retention`; anything older counts as
    /// expired regardless of whether physical cleanup has run.
    pub async fn contains(
        pool: &PgPool,
        token: &str,
        cutoff: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM revoked_tokens WHERE token = $1 AND created_at > $2
             )",
        )
        .bind(token)
        .bind(cutoff)
        .fetch_one(pool)
        .await
    }

    /// Delete revocation records older than `cutoff`. Returns the count of
    /// deleted rows.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
