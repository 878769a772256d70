//! Schema bootstrap for reviews, comments and view logs

use sqlx::SqlitePool;

const REVIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(200) NOT NULL,
    author VARCHAR(100) NOT NULL,
    pass_status VARCHAR(10) NOT NULL CHECK(pass_status IN ('Pass', 'Fail')),
    exam_date TEXT,
    study_period VARCHAR(50),
    study_period_months INTEGER,
    experience VARCHAR(50),
    english_level VARCHAR(10) CHECK(english_level IN ('High', 'Medium', 'Low')),
    is_working BOOLEAN NOT NULL DEFAULT FALSE,
    resources TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL,
    center_tips TEXT,
    view_count INTEGER NOT NULL DEFAULT 0 CHECK(view_count >= 0),
    likes INTEGER NOT NULL DEFAULT 0 CHECK(likes >= 0),
    is_verified BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    review_id INTEGER NOT NULL,
    author VARCHAR(100) NOT NULL,
    content TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (review_id) REFERENCES reviews(id) ON DELETE CASCADE
)
"#;

const VIEW_LOGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS view_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    review_id INTEGER NOT NULL,
    ip_address VARCHAR(45) NOT NULL,
    viewed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (review_id) REFERENCES reviews(id) ON DELETE CASCADE,
    UNIQUE(review_id, ip_address)
)
"#;

const INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_reviews_created_at ON reviews(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_comments_review_id ON comments(review_id)",
];

/// Create all tables and indexes if they are missing. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Initializing review schema...");

    for ddl in [REVIEWS_TABLE, COMMENTS_TABLE, VIEW_LOGS_TABLE]
        .into_iter()
        .chain(INDEXES)
    {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("Review schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, DbConfig};

    async fn table_names(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = create_pool(&DbConfig::new(dir.path().join("schema.db")))
            .await
            .unwrap();

        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        assert_eq!(
            table_names(&pool).await,
            vec!["comments", "reviews", "view_logs"]
        );
    }

    #[tokio::test]
    async fn check_constraint_rejects_bad_pass_status() {
        let dir = tempfile::TempDir::new().unwrap();
        let pool = create_pool(&DbConfig::new(dir.path().join("schema.db")))
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();

        let result = sqlx::query(
            "INSERT INTO reviews (title, author, pass_status, content) VALUES ('t', 'a', 'Maybe', 'c')",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
