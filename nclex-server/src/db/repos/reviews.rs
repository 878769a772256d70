//! Review repository
//!
//! - create: single INSERT, resources comma-joined
//! - create_many: the same INSERT repeated inside one transaction
//! - list: filter clauses rendered with bound parameters, separate COUNT
//! - counters: single atomic UPDATE statements

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use crate::models::{
    EnglishLevel, FilterClause, NewReview, Paginated, Pagination, PassStatus, ResourceList,
    ReviewFilter, ValidationError,
};
use super::DbError;

const REVIEW_COLUMNS: &str = "id, title, author, pass_status, exam_date, study_period, \
     study_period_months, experience, english_level, is_working, resources, content, \
     center_tips, view_count, likes, is_verified, created_at";

/// Review record from database
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub pass_status: PassStatus,
    pub exam_date: Option<String>,
    pub study_period: Option<String>,
    pub study_period_months: Option<i64>,
    pub experience: Option<String>,
    pub english_level: Option<EnglishLevel>,
    pub is_working: bool,
    pub resources: ResourceList,
    pub content: String,
    pub center_tips: Option<String>,
    pub view_count: i64,
    pub likes: i64,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

fn decode_err(column: &str, e: ValidationError) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_owned(),
        source: Box::new(e),
    }
}

impl<'r> FromRow<'r, SqliteRow> for Review {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let pass_status: String = row.try_get("pass_status")?;
        let english_level: Option<String> = row.try_get("english_level")?;
        let resources: Option<String> = row.try_get("resources")?;

        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            pass_status: pass_status
                .parse::<PassStatus>()
                .map_err(|e| decode_err("pass_status", e))?,
            exam_date: row.try_get("exam_date")?,
            study_period: row.try_get("study_period")?,
            study_period_months: row.try_get("study_period_months")?,
            experience: row.try_get("experience")?,
            english_level: english_level
                .map(|v| v.parse::<EnglishLevel>())
                .transpose()
                .map_err(|e| decode_err("english_level", e))?,
            is_working: row.try_get("is_working")?,
            resources: ResourceList::parse(resources.as_deref().unwrap_or_default()),
            content: row.try_get("content")?,
            center_tips: row.try_get("center_tips")?,
            view_count: row.try_get("view_count")?,
            likes: row.try_get("likes")?,
            is_verified: row.try_get("is_verified")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Wrap a user substring in LIKE wildcards, escaping the wildcard characters
/// so they match literally.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Append `WHERE` for the filter. Every value goes through `push_bind`.
fn push_where(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ReviewFilter) {
    qb.push(" WHERE 1=1");
    for clause in filter.clauses() {
        match clause {
            FilterClause::Search(text) => {
                let pattern = like_pattern(text);
                qb.push(" AND (title LIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" ESCAPE '\\' OR content LIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" ESCAPE '\\' OR author LIKE ");
                qb.push_bind(pattern);
                qb.push(" ESCAPE '\\')");
            }
            FilterClause::IsWorking(working) => {
                qb.push(" AND is_working = ");
                qb.push_bind(*working);
            }
            FilterClause::EnglishLevel(level) => {
                qb.push(" AND english_level = ");
                qb.push_bind(level.clone());
            }
            FilterClause::Resource(name) => {
                qb.push(" AND resources LIKE ");
                qb.push_bind(like_pattern(name));
                qb.push(" ESCAPE '\\'");
            }
        }
    }
}

/// Review repository
pub struct ReviewRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert<'e, E>(executor: E, review: &NewReview) -> Result<i64, DbError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO reviews (
                title, author, pass_status, exam_date, study_period, study_period_months,
                experience, english_level, is_working, resources, content, center_tips,
                created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&review.title)
        .bind(&review.author)
        .bind(review.pass_status.as_str())
        .bind(review.exam_date.as_deref())
        .bind(review.study_period.as_deref())
        .bind(review.study_period_months)
        .bind(review.experience.as_deref())
        .bind(review.english_level.map(|l| l.as_str()))
        .bind(review.is_working)
        .bind(review.resources.join())
        .bind(&review.content)
        .bind(review.center_tips.as_deref())
        .bind(Utc::now())
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a review, returning its new id.
    pub async fn create(&self, review: &NewReview) -> Result<i64, DbError> {
        let id = Self::insert(self.pool, review).await?;
        tracing::debug!(review_id = id, "review created");
        Ok(id)
    }

    /// Insert several reviews in one transaction. Either all rows land or none do.
    pub async fn create_many(&self, reviews: &[NewReview]) -> Result<Vec<i64>, DbError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(reviews.len());
        for review in reviews {
            ids.push(Self::insert(&mut *tx, review).await?);
        }
        tx.commit().await?;

        tracing::debug!(count = ids.len(), "reviews created");
        Ok(ids)
    }

    /// List reviews matching the filter, newest first.
    ///
    /// The total is counted separately so a page past the end still
    /// reports how many rows match.
    pub async fn list(
        &self,
        filter: &ReviewFilter,
        page: Pagination,
    ) -> Result<Paginated<Review>, DbError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM reviews");
        push_where(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        let mut select = QueryBuilder::<Sqlite>::new("SELECT ");
        select.push(REVIEW_COLUMNS);
        select.push(" FROM reviews");
        push_where(&mut select, filter);
        select.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        select.push_bind(i64::from(page.limit()));
        select.push(" OFFSET ");
        select.push_bind(page.offset() as i64);

        let items: Vec<Review> = select.build_query_as().fetch_all(self.pool).await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Get a single review by id.
    pub async fn get(&self, id: i64) -> Result<Option<Review>, DbError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(review)
    }

    /// Like `get`, but a missing row is `DbError::NotFound`.
    pub async fn require(&self, id: i64) -> Result<Review, DbError> {
        self.get(id)
            .await?
            .ok_or_else(|| DbError::review_not_found(id))
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DbError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reviews WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// Add one like, returning the new count (0 if the review does not exist).
    pub async fn increment_likes(&self, id: i64) -> Result<i64, DbError> {
        let likes: Option<i64> =
            sqlx::query_scalar("UPDATE reviews SET likes = likes + 1 WHERE id = ? RETURNING likes")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(likes.unwrap_or(0))
    }

    /// Delete a review and, through the cascade, its comments and view logs.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(review_id = id, "review deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("UWorld"), "%UWorld%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }

    #[test]
    fn where_clause_binds_values() {
        let filter = ReviewFilter::new()
            .with(FilterClause::Search("x' OR 1=1 --".into()))
            .with(FilterClause::IsWorking(true));
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM reviews");
        push_where(&mut qb, &filter);
        let sql = qb.sql();
        assert!(!sql.contains("OR 1=1"));
        assert_eq!(sql.matches('?').count(), 4);
    }

    #[tokio::test]
    async fn create_then_get() {
        let (_dir, pool) = test_pool().await;
        let repo = ReviewRepo::new(&pool);

        let id = repo
            .create(&NewReview::new("My NCLEX Journey", "Jane", "Long story").unwrap())
            .await
            .unwrap();
        assert_eq!(id, 1);

        let review = repo.get(id).await.unwrap().expect("review exists");
        assert_eq!(review.title, "My NCLEX Journey");
        assert_eq!(review.pass_status, PassStatus::Pass);
        assert!(!review.is_working);
        assert!(!review.is_verified);
        assert!(review.resources.is_empty());
        assert_eq!(review.view_count, 0);
        assert_eq!(review.likes, 0);
        assert_eq!(review.english_level, None);
        assert_eq!(review.study_period_months, None);
    }

    #[tokio::test]
    async fn missing_review_is_none() {
        let (_dir, pool) = test_pool().await;
        let repo = ReviewRepo::new(&pool);
        assert!(repo.get(42).await.unwrap().is_none());
        assert!(!repo.exists(42).await.unwrap());
        assert!(matches!(
            repo.require(42).await,
            Err(DbError::NotFound { resource: "review", .. })
        ));
    }

    #[tokio::test]
    async fn likes_increment_and_default_to_zero() {
        let (_dir, pool) = test_pool().await;
        let repo = ReviewRepo::new(&pool);
        let id = repo
            .create(&NewReview::new("t", "a", "c").unwrap())
            .await
            .unwrap();

        assert_eq!(repo.increment_likes(id).await.unwrap(), 1);
        assert_eq!(repo.increment_likes(id).await.unwrap(), 2);
        assert_eq!(repo.increment_likes(id + 100).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let (_dir, pool) = test_pool().await;
        let repo = ReviewRepo::new(&pool);
        let id = repo
            .create(&NewReview::new("t", "a", "c").unwrap())
            .await
            .unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
    }

    async fn count_rows(pool: &SqlitePool, table: &str, review_id: i64) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE review_id = ?");
        let (n,): (i64,) = sqlx::query_as(&sql)
            .bind(review_id)
            .fetch_one(pool)
            .await
            .unwrap();
        n
    }

    #[tokio::test]
    async fn delete_removes_comments_and_view_logs() {
        use crate::db::repos::{CommentRepo, ViewRepo};
        use crate::models::NewComment;

        let (_dir, pool) = test_pool().await;
        let repo = ReviewRepo::new(&pool);
        let id = repo
            .create(&NewReview::new("t", "a", "c").unwrap())
            .await
            .unwrap();
        let other = repo
            .create(&NewReview::new("kept", "b", "d").unwrap())
            .await
            .unwrap();

        let comments = CommentRepo::new(&pool);
        comments
            .create(id, &NewComment::new("Sam", "Congrats").unwrap())
            .await
            .unwrap();
        comments
            .create(other, &NewComment::new("Kim", "Thanks").unwrap())
            .await
            .unwrap();
        let views = ViewRepo::new(&pool);
        assert!(views.record_view(id, "10.0.0.1").await.unwrap());
        assert!(views.record_view(id, "10.0.0.2").await.unwrap());
        assert!(views.record_view(other, "10.0.0.1").await.unwrap());

        assert!(repo.delete(id).await.unwrap());

        assert_eq!(count_rows(&pool, "comments", id).await, 0);
        assert_eq!(count_rows(&pool, "view_logs", id).await, 0);
        assert_eq!(count_rows(&pool, "comments", other).await, 1);
        assert_eq!(count_rows(&pool, "view_logs", other).await, 1);
    }

    #[tokio::test]
    async fn create_many_is_all_or_nothing() {
        let (_dir, pool) = test_pool().await;
        let repo = ReviewRepo::new(&pool);

        let ids = repo
            .create_many(&[
                NewReview::new("one", "a", "c").unwrap(),
                NewReview::new("two", "b", "d").unwrap(),
            ])
            .await
            .unwrap();
        assert_eq!(ids, vec![1, 2]);

        sqlx::query(
            "CREATE TRIGGER reject_boom BEFORE INSERT ON reviews \
             WHEN NEW.title = 'boom' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(&pool)
        .await
        .unwrap();

        let result = repo
            .create_many(&[
                NewReview::new("three", "a", "c").unwrap(),
                NewReview::new("boom", "b", "d").unwrap(),
            ])
            .await;
        assert!(matches!(result, Err(DbError::Sqlx(_))));

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 2);
    }
}
