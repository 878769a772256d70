//! Comment repository
//!
//! Comments are immutable once written and only removed by the cascade
//! when their review is deleted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::models::NewComment;
use super::DbError;

/// Comment record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub review_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a comment, returning its new id.
    ///
    /// The review is not looked up first; a dangling `review_id` fails on
    /// the foreign key and comes back as `DbError::Sqlx`.
    pub async fn create(&self, review_id: i64, comment: &NewComment) -> Result<i64, DbError> {
        let result = sqlx::query(
            "INSERT INTO comments (review_id, author, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(review_id)
        .bind(&comment.author)
        .bind(&comment.content)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(review_id, comment_id = id, "comment created");
        Ok(id)
    }

    /// All comments on a review, oldest first.
    pub async fn list_for_review(&self, review_id: i64) -> Result<Vec<Comment>, DbError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, review_id, author, content, created_at
            FROM comments
            WHERE review_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(review_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::ReviewRepo;
    use crate::db::test_support::test_pool;
    use crate::models::NewReview;

    #[tokio::test]
    async fn comments_listed_oldest_first() {
        let (_dir, pool) = test_pool().await;
        let review_id = ReviewRepo::new(&pool)
            .create(&NewReview::new("t", "a", "c").unwrap())
            .await
            .unwrap();
        let repo = CommentRepo::new(&pool);

        let first = repo
            .create(review_id, &NewComment::new("Sam", "first").unwrap())
            .await
            .unwrap();
        let second = repo
            .create(review_id, &NewComment::new("Kim", "second").unwrap())
            .await
            .unwrap();

        let comments = repo.list_for_review(review_id).await.unwrap();
        let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(comments[0].content, "first");
        assert_eq!(comments[1].author, "Kim");
    }

    #[tokio::test]
    async fn dangling_review_id_is_a_database_error() {
        let (_dir, pool) = test_pool().await;
        let result = CommentRepo::new(&pool)
            .create(999, &NewComment::new("Sam", "orphan").unwrap())
            .await;
        assert!(matches!(result, Err(DbError::Sqlx(_))));
    }
}
