//! Pagination types

use serde::Serialize;

use super::ValidationError;

/// Maximum items per page
pub const MAX_PER_PAGE: u32 = 50;

/// Default items per page
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 50)
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination from raw request values, rejecting anything out of range.
    pub fn try_new(page: i64, per_page: i64) -> Result<Self, ValidationError> {
        if page < 1 || page > i64::from(u32::MAX) {
            return Err(ValidationError::OutOfRange {
                field: "page",
                min: 1,
                max: i64::from(u32::MAX),
            });
        }
        if !(1..=i64::from(MAX_PER_PAGE)).contains(&per_page) {
            return Err(ValidationError::OutOfRange {
                field: "per_page",
                min: 1,
                max: i64::from(MAX_PER_PAGE),
            });
        }
        Ok(Self {
            page: page as u32,
            per_page: per_page as u32,
        })
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.per_page)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// A page of rows plus the total match count ignoring pagination
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Calculate total number of pages: `ceil(total / per_page)`.
    ///
    /// Zero matches means zero pages.
    pub fn total_pages(&self) -> u32 {
        let total = self.total.max(0) as u64;
        let per_page = u64::from(self.per_page.max(1));
        total.div_ceil(per_page) as u32
    }
}
