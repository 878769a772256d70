//! Review list filters
//!
//! Raw query-string values are turned into a list of typed clauses here.
//! The repository renders each clause with bound parameters, so no user
//! input is ever spliced into SQL text.

use serde::Deserialize;

use super::{Pagination, ValidationError, DEFAULT_PER_PAGE};

/// Sentinel meaning "do not filter on this field"
pub const ALL_SENTINEL: &str = "all";

/// One predicate on the reviews table. Clauses are combined with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    /// Case-insensitive substring match against title, content or author
    Search(String),
    /// Exact match on the working-status flag
    IsWorking(bool),
    /// Exact match on the stored English level. Values that name no level
    /// simply match nothing.
    EnglishLevel(String),
    /// Substring match against the stored resource list
    Resource(String),
}

/// Conjunction of filter clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    clauses: Vec<FilterClause>,
}

impl ReviewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// `is_working` query value: "yes" and "no" filter, anything else does not.
pub fn parse_is_working(value: Option<&str>) -> Option<bool> {
    match value {
        Some("yes") => Some(true),
        Some("no") => Some(false),
        _ => None,
    }
}

/// Returns the value unless it is absent, empty or the `all` sentinel.
fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
}

/// Query parameters for `GET /api/reviews`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    #[serde(default)]
    pub search: String,
    pub is_working: Option<String>,
    pub english_level: Option<String>,
    pub resource: Option<String>,
}

impl ReviewListParams {
    pub fn pagination(&self) -> Result<Pagination, ValidationError> {
        Pagination::try_new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(i64::from(DEFAULT_PER_PAGE)),
        )
    }

    /// Search text is matched as given, surrounding whitespace included.
    pub fn filter(&self) -> ReviewFilter {
        let mut filter = ReviewFilter::new();

        if !self.search.is_empty() {
            filter = filter.with(FilterClause::Search(self.search.clone()));
        }
        if let Some(working) = parse_is_working(self.is_working.as_deref()) {
            filter = filter.with(FilterClause::IsWorking(working));
        }
        if let Some(level) = active(self.english_level.as_deref()) {
            filter = filter.with(FilterClause::EnglishLevel(level.to_owned()));
        }
        if let Some(resource) = active(self.resource.as_deref()) {
            filter = filter.with(FilterClause::Resource(resource.to_owned()));
        }

        filter
    }
}
