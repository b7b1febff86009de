use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use super::property::Property;

pub const DEFAULT_PAGE_LIMIT: u32 = 12;

// Unreserved characters per RFC 3986 stay as-is in query values
const QUERY_VALUE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Pagination metadata returned alongside a page of listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl Pagination {
    /// Number of pages, derived from total and limit when the backend omits it
    pub fn page_count(&self) -> u32 {
        self.total_pages.unwrap_or_else(|| {
            if self.limit == 0 {
                0
            } else {
                u32::try_from(self.total.div_ceil(u64::from(self.limit))).unwrap_or(u32::MAX)
            }
        })
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }
}

/// One page of listings as fetched from the paginated endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListingPage {
    pub properties: Vec<Property>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Query parameters for the paginated listings endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(1), limit: limit.max(1), search: None }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() { None } else { Some(search) };
        self
    }

    /// Request for the page after `pagination`, or `None` on the last page
    pub fn next_after(pagination: &Pagination) -> Option<Self> {
        pagination.has_next().then(|| Self::new(pagination.page + 1, pagination.limit))
    }

    /// Render as `page=..&limit=..[&search=..]` with the search term percent-encoded
    pub fn to_query_string(&self) -> String {
        let mut query = format!("page={}&limit={}", self.page, self.limit);
        if let Some(ref search) = self.search {
            query.push_str("&search=");
            query.push_str(&utf8_percent_encode(search.trim(), QUERY_VALUE_SET).to_string());
        }
        query
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}
