//! Free-text search over listings.
//!
//! Mirrors the listings endpoint's `search` parameter locally: a listing is kept when its
//! title, address and city fuzzy-match the query. Unlike ranking, retaining keeps the order
//! chosen by the sort comparator.

use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher, Utf32Str};

use crate::models::Property;

/// Reusable fuzzy matcher for one query
pub struct TextSearch {
    pattern: Option<Pattern>,
    matcher: Matcher,
    buf: Vec<char>,
}

impl TextSearch {
    pub fn new(query: &str) -> Self {
        let query = query.trim();
        let pattern = (!query.is_empty())
            .then(|| Pattern::parse(query, CaseMatching::Smart, Normalization::Smart));
        Self { pattern, matcher: Matcher::new(Config::DEFAULT), buf: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn matches(&mut self, property: &Property) -> bool {
        let Some(ref pattern) = self.pattern else {
            return true;
        };
        let haystack = property.search_text();
        pattern.score(Utf32Str::new(&haystack, &mut self.buf), &mut self.matcher).is_some()
    }
}

/// Keep the indices whose property matches `query`, preserving order
pub fn fuzzy_retain(indices: &mut Vec<usize>, store: &[Property], query: &str) {
    let mut search = TextSearch::new(query);
    if search.is_empty() {
        return;
    }
    indices.retain(|&idx| search.matches(&store[idx]));
}
