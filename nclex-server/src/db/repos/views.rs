//! View dedup - one counted view per (review, IP)
//!
//! `view_logs` carries `UNIQUE(review_id, ip_address)`. The insert uses
//! `ON CONFLICT DO NOTHING`, so "already viewed" is reported as zero
//! affected rows instead of a constraint error, and two racing requests
//! for the same pair can only ever insert one row between them.

use sqlx::SqlitePool;

use super::DbError;

/// View log repository
pub struct ViewRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ViewRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the (review, ip) pair if absent. Returns whether a row was inserted.
    ///
    /// A missing review inserts nothing and returns `false`.
    async fn insert_if_absent<'e, E>(executor: E, review_id: i64, ip: &str) -> Result<bool, DbError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO view_logs (review_id, ip_address, viewed_at)
            SELECT ?, ?, CURRENT_TIMESTAMP
            WHERE EXISTS(SELECT 1 FROM reviews WHERE id = ?)
            ON CONFLICT(review_id, ip_address) DO NOTHING
            "#,
        )
        .bind(review_id)
        .bind(ip)
        .bind(review_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Record a view from `ip` and bump `view_count` if it is the first one.
    ///
    /// Both statements run in one transaction. Returns `true` iff the
    /// counter was incremented.
    pub async fn record_view(&self, review_id: i64, ip: &str) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        if !Self::insert_if_absent(&mut *tx, review_id, ip).await? {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("UPDATE reviews SET view_count = view_count + 1 WHERE id = ?")
            .bind(review_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(review_id, ip, "view counted");
        Ok(true)
    }
}
