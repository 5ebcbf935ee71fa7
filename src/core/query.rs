//! Sort keys, page windows and query parameters

use crate::core::error::{Result, ViewError};
use crate::core::record::RecordField;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use validator::Validate;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ViewError::InvalidQuery(format!(
                "unknown sort direction '{}', expected asc or desc",
                other
            ))),
        }
    }
}

/// The active (field, direction) pair ordering a view
///
/// Exactly one sort key is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: RecordField> SortKey<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: F) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: F) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Same field, opposite direction
    pub fn reverse(self) -> Self {
        Self::new(self.field, self.direction.reverse())
    }

    /// Column-header click semantics
    ///
    /// Selecting the active field reverses its direction; selecting another
    /// field sorts by it ascending.
    pub fn toggle(self, field: F) -> Self {
        if self.field == field {
            self.reverse()
        } else {
            Self::asc(field)
        }
    }

    /// Parse a sort expression
    ///
    /// # Format
    /// - `field` or `field:asc` (ascending)
    /// - `field:desc` (descending)
    pub fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(ViewError::InvalidQuery("empty sort expression".to_string()));
        }

        match expr.split_once(':') {
            Some((field, direction)) => Ok(Self::new(
                F::parse(field)?,
                SortDirection::parse(direction)?,
            )),
            None => Ok(Self::asc(F::parse(expr)?)),
        }
    }
}

impl<F: RecordField> fmt::Display for SortKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.name(), self.direction.as_str())
    }
}

/// The (page, page size) pair selecting which slice of a view is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Page number (starts at 1)
    pub page: usize,
    /// Number of records per page
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// First page with the given size
    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    /// Clamp the page number to `[1, total_pages(total)]`
    pub fn clamp(self, total: usize) -> Self {
        let last = crate::core::pipeline::total_pages(total, self.page_size);
        Self {
            page: self.page.clamp(1, last),
            page_size: self.page_size,
        }
    }

    /// Index of the first record of the page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Pagination metadata of a projected page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1, clamped to the last page)
    pub page: usize,

    /// Number of records per page
    pub page_size: usize,

    /// Total number of records after filters
    pub total: usize,

    /// Total number of pages (at least 1, even when empty)
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,

    /// 1-based position of the first record shown (0 when empty)
    pub first_item: usize,

    /// 1-based position of the last record shown (0 when empty)
    pub last_item: usize,
}

impl PaginationMeta {
    /// Create pagination metadata, clamping the page into range
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let window = PageWindow::new(page, page_size).clamp(total);
        let total_pages = crate::core::pipeline::total_pages(total, window.page_size);
        let start = window.offset();
        let end = (start + window.page_size).min(total);

        Self {
            page: window.page,
            page_size: window.page_size,
            total,
            total_pages,
            has_next: window.page < total_pages,
            has_prev: window.page > 1,
            first_item: if total == 0 { 0 } else { start + 1 },
            last_item: end,
        }
    }
}

/// Query parameters describing a view in URL form
///
/// All parameters have sensible defaults.
///
/// # Example
/// ```text
/// ?page=2&limit=10
/// ?search=room&filter={"status": "open"}
/// ?filter={"total_spent>=": 10000000, "nationality~": "indo"}&sort=total_spent:desc
/// ```
#[derive(Debug, Clone, Deserialize, Default, Validate)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of records per page; the view's configured page size when absent
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,

    /// Free-text search term
    pub search: Option<String>,

    /// Filters as JSON object
    ///
    /// # Format
    /// - Exact match: `{"field": "value"}` (`"all"` disables the filter)
    /// - Range bounds: `{"field>=": value, "field<=": value}`
    /// - Substring: `{"field~": "term"}`
    pub filter: Option<String>,

    /// Sort field and direction (`field:asc` or `field:desc`)
    pub sort: Option<String>,
}

fn default_page() -> usize {
    1
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get the requested limit, clamped to [1, 100]
    pub fn limit(&self) -> Option<usize> {
        self.limit.map(|limit| limit.clamp(1, 100))
    }

    /// Parse the filter JSON string
    ///
    /// Unlike lenient URL handling, malformed JSON is an error so that
    /// wiring mistakes surface instead of silently matching everything.
    pub fn filter_value(&self) -> Result<Option<Value>> {
        match self.filter.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
        }
    }
}
