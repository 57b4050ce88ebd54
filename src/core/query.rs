//! Query parameters and pagination
//!
//! Collection routes accept `page`, `properties` (field selection) and any
//! declared filter parameters. Pages are a fixed 10 items; a page past the
//! end of the collection is an empty list with the correct total, not an
//! error.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Fixed collection page size
pub const ITEMS_PER_PAGE: usize = 10;

// Parameters with reserved meanings; never handed to the filter engine.
const RESERVED_PARAMS: &[&str] = &["page", "properties"];

/// Parsed collection query string
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// 1-based page number
    pub page: usize,

    /// Requested field selection (comma-separated `properties` parameter).
    /// Narrows the projected field set; can never widen it.
    pub properties: Option<HashSet<String>>,

    /// Remaining parameters, candidate filters for the declared set
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    /// Parse raw query parameters.
    ///
    /// An unparsable or sub-1 `page` falls back to 1, matching the
    /// tolerance the filter engine shows for stray parameters.
    pub fn from_params(params: HashMap<String, String>) -> Self {
        let page = params
            .get("page")
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);

        let properties = params.get("properties").map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        });

        let mut filters: Vec<(String, String)> = params
            .into_iter()
            .filter(|(name, _)| !RESERVED_PARAMS.contains(&name.as_str()))
            .collect();
        filters.sort();

        Self {
            page,
            properties,
            filters,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_params(HashMap::new())
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The page of items
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    fn new(page: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(ITEMS_PER_PAGE);
        let start = (page - 1) * ITEMS_PER_PAGE;

        Self {
            page,
            limit: ITEMS_PER_PAGE,
            total,
            total_pages,
            has_next: start + ITEMS_PER_PAGE < total,
            has_prev: page > 1,
        }
    }
}

/// Slice a filtered collection into the requested page.
///
/// A page beyond the last returns an empty slice with the metadata still
/// reporting the full total.
pub fn paginate<T>(items: Vec<T>, page: usize) -> (Vec<T>, PaginationMeta) {
    let page = page.max(1);
    let total = items.len();
    let meta = PaginationMeta::new(page, total);
    let page_items = items
        .into_iter()
        .skip((page - 1) * ITEMS_PER_PAGE)
        .take(ITEMS_PER_PAGE)
        .collect();
    (page_items, meta)
}
