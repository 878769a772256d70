//! Database maintenance commands: schema init, stats, bulk import

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use sqlx::SqlitePool;

use nclex_server::db::{create_pool, init_schema, DbConfig, ReviewRepo, Stats, StatsRepo};
use nclex_server::models::{NewReview, ReviewSubmission};

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Emit JSON instead of a human-readable summary
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the import command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// JSON file holding an array of review submissions
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

async fn open(db: &DbConfig) -> Result<SqlitePool> {
    let pool = create_pool(db)
        .await
        .with_context(|| format!("Failed to open database {}", db.path.display()))?;
    init_schema(&pool)
        .await
        .context("Failed to initialize schema")?;
    Ok(pool)
}

/// Create the schema and exit
pub async fn run_init_db(db: &DbConfig) -> Result<()> {
    let pool = open(db).await?;
    pool.close().await;
    println!("Initialized {}", db.path.display());
    Ok(())
}

fn render_stats(stats: &Stats) -> String {
    format!(
        "Reviews:          {}\nPass rate:        {}%\nAvg study months: {}",
        stats.total_reviews, stats.pass_rate, stats.avg_study_months
    )
}

/// Print the aggregate summary
pub async fn run_stats(db: &DbConfig, args: StatsArgs) -> Result<()> {
    let pool = open(db).await?;
    let stats = StatsRepo::new(&pool).compute().await?;
    pool.close().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", render_stats(&stats));
    }
    Ok(())
}

/// Validate every entry before touching the database
fn parse_import(raw: &str) -> Result<Vec<NewReview>> {
    let submissions: Vec<ReviewSubmission> =
        serde_json::from_str(raw).context("Expected a JSON array of review submissions")?;

    submissions
        .into_iter()
        .enumerate()
        .map(|(index, submission)| {
            NewReview::try_from(submission).map_err(|e| anyhow!("entry {}: {}", index, e))
        })
        .collect()
}

/// Import reviews from a JSON file
pub async fn run_import(db: &DbConfig, args: ImportArgs) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let reviews = parse_import(&raw)?;

    let pool = open(db).await?;
    let ids = ReviewRepo::new(&pool)
        .create_many(&reviews)
        .await
        .context("Import failed, no reviews were written")?;
    pool.close().await;
    tracing::debug!(first_id = ?ids.first(), last_id = ?ids.last(), "imported reviews");

    println!("Imported {} reviews into {}", reviews.len(), db.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_import_accepts_minimal_entries() {
        let reviews = parse_import(
            r#"[
                {"title": "First try", "author": "A", "content": "Did it"},
                {"title": "Second", "author": "B", "content": "Also did it",
                 "pass_status": "Fail", "resources": ["UWorld"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].resources.as_slice().to_vec(), vec!["UWorld".to_string()]);
    }

    #[test]
    fn parse_import_reports_failing_entry() {
        let err = parse_import(
            r#"[
                {"title": "ok", "author": "A", "content": "x"},
                {"title": "", "author": "B", "content": "y"}
            ]"#,
        )
        .unwrap_err();

        assert!(err.to_string().starts_with("entry 1:"), "{err}");
    }

    #[test]
    fn parse_import_rejects_non_array() {
        assert!(parse_import(r#"{"title": "x"}"#).is_err());
    }

    #[test]
    fn stats_summary_lines() {
        let text = render_stats(&Stats {
            total_reviews: 3,
            pass_rate: 67,
            avg_study_months: 5,
        });
        assert!(text.contains("Reviews:          3"));
        assert!(text.contains("67%"));
    }
}
