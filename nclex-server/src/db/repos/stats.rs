//! Aggregate stats for the landing page

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// Average study length reported when no review has one set
pub const DEFAULT_AVG_STUDY_MONTHS: i64 = 4;

/// Site-wide review stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_reviews: i64,
    /// Percentage of reviews that passed, rounded to the nearest integer
    pub pass_rate: i64,
    pub avg_study_months: i64,
}

#[derive(FromRow)]
struct StatsRow {
    total: i64,
    passed: i64,
    avg_months: Option<f64>,
}

impl From<StatsRow> for Stats {
    fn from(row: StatsRow) -> Self {
        let pass_rate = if row.total > 0 {
            (row.passed as f64 * 100.0 / row.total as f64).round() as i64
        } else {
            0
        };
        let avg_study_months = row
            .avg_months
            .map(|avg| avg.round() as i64)
            .unwrap_or(DEFAULT_AVG_STUDY_MONTHS);

        Self {
            total_reviews: row.total,
            pass_rate,
            avg_study_months,
        }
    }
}

/// Stats repository
pub struct StatsRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StatsRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Count, pass rate and average study months in one query.
    pub async fn compute(&self) -> Result<Stats, DbError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN pass_status = 'Pass' THEN 1 ELSE 0 END), 0) AS passed,
                CAST(AVG(study_period_months) AS REAL) AS avg_months
            FROM reviews
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
