//! The filter state container.
//!
//! [`ListingExplorer`] owns the listing store, the [`FilterState`] and everything derived from
//! the pair. Every change goes through one of its methods, and each method that can change the
//! result runs at most one filter pass:
//!
//! 1. keep the store entries matching every predicate
//! 2. narrow by the free-text query, if any
//! 3. stable-sort by the selected key
//! 4. collect the distinct addresses of what is left
//!
//! Price bounds are derived when the store changes, not per pass. Price-range input is
//! debounced: the immediate range follows input, the debounced range moves on [`tick`] once the
//! input has been quiet for the configured delay.
//!
//! [`tick`]: ListingExplorer::tick

use std::time::Instant;

use tracing::{debug, warn};

use super::bounds::{distinct_locations, price_bounds};
use super::debounce::Debouncer;
use crate::config::ExplorerConfig;
use crate::error::FilterError;
use crate::filters::{
    FilterState, FilterUpdate, PriceRange, fuzzy_retain, matching_indices, sort_indices,
};
use crate::models::{ListingPage, PageRequest, Pagination, Property};

#[derive(Debug)]
pub struct ListingExplorer {
    config: ExplorerConfig,
    store: Vec<Property>,
    pagination: Option<Pagination>,
    load_error: Option<String>,
    bounds: PriceRange,
    state: FilterState,
    price_debounce: Debouncer<PriceRange>,
    search_query: String,
    /// Indices into `store`, filtered and sorted
    results: Vec<usize>,
    locations: Vec<String>,
    filter_passes: u64,
}

impl ListingExplorer {
    /// Explorer over an empty store
    pub fn new(config: ExplorerConfig) -> Self {
        let bounds = config.fallback_price_range;
        let state = FilterState::new(bounds, config.default_sort);
        let price_debounce = Debouncer::new(config.debounce());
        Self {
            config,
            store: Vec::new(),
            pagination: None,
            load_error: None,
            bounds,
            state,
            price_debounce,
            search_query: String::new(),
            results: Vec::new(),
            locations: Vec::new(),
            filter_passes: 0,
        }
    }

    pub fn with_listings(config: ExplorerConfig, listings: Vec<Property>) -> Self {
        let mut explorer = Self::new(config);
        explorer.set_listings(listings);
        explorer
    }

    /// Replace the store
    ///
    /// Clears any load error, re-derives the price bounds and resets both price ranges to them.
    /// Other selections are kept. A pending price change is dropped.
    pub fn set_listings(&mut self, listings: Vec<Property>) {
        self.store = listings;
        self.load_error = None;
        self.bounds = price_bounds(&self.store, self.config.fallback_price_range);
        self.price_debounce.cancel();
        self.state.reset_price_bounds(self.bounds);
        debug!(
            listings = self.store.len(),
            min = self.bounds.min,
            max = self.bounds.max,
            "store replaced"
        );
        self.recompute();
    }

    /// Replace the store with a fetched page, keeping its pagination metadata
    pub fn load_page(&mut self, page: ListingPage) {
        self.pagination = page.pagination;
        self.set_listings(page.properties);
    }

    /// Mark the upstream fetch as failed; nothing is shown until a store is loaded again
    pub fn set_load_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "listing load failed");
        self.load_error = Some(message);
        self.price_debounce.cancel();
        self.results.clear();
        self.locations.clear();
    }

    /// Merge a partial update into the filter state
    ///
    /// A price range only moves the immediate range and (re)starts the debounce. Returns
    /// whether a filter pass ran. On error the state is left untouched.
    pub fn update_filters(
        &mut self,
        update: FilterUpdate,
        now: Instant,
    ) -> Result<bool, FilterError> {
        let applied = self.state.apply(&update)?;

        if applied.price_input_changed {
            self.price_debounce.schedule(self.state.price_range, now);
            debug!(range = %self.state.price_range, "price change scheduled");
        }
        Ok(applied.selections_changed && self.recompute())
    }

    /// Commit a settled price range; returns whether a filter pass ran
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.price_debounce.poll(now) {
            Some(range) => self.commit_price(range),
            None => false,
        }
    }

    /// Commit a pending price range without waiting for the quiet period
    pub fn flush_pending(&mut self) -> bool {
        match self.price_debounce.flush() {
            Some(range) => self.commit_price(range),
            None => false,
        }
    }

    fn commit_price(&mut self, range: PriceRange) -> bool {
        self.state.commit_price_range(range) && self.recompute()
    }

    /// Set the free-text query; returns whether a filter pass ran
    pub fn set_search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if self.search_query == query {
            return false;
        }
        self.search_query = query.to_string();
        self.recompute()
    }

    /// Reset every filter to its default, with the price range at the current bounds
    ///
    /// The free-text query is not a filter selection and is left as it is.
    pub fn clear_filters(&mut self) {
        self.price_debounce.cancel();
        self.state = FilterState::new(self.bounds, self.config.default_sort);
        self.recompute();
    }

    /// Run a filter pass; skipped while a load error is set
    fn recompute(&mut self) -> bool {
        if self.load_error.is_some() {
            return false;
        }

        let mut results = matching_indices(&self.store, &self.state);
        fuzzy_retain(&mut results, &self.store, &self.search_query);
        sort_indices(&mut results, &self.store, self.state.sort_by);

        self.locations = distinct_locations(&self.store, &results);
        self.results = results;
        self.filter_passes += 1;

        debug!(
            pass = self.filter_passes,
            results = self.results.len(),
            total = self.store.len(),
            "filter pass"
        );
        true
    }

    /// Filtered and sorted listings
    pub fn results(&self) -> impl ExactSizeIterator<Item = &Property> + '_ {
        self.results.iter().map(|&idx| &self.store[idx])
    }

    /// The listing at `position` in the result
    pub fn result(&self, position: usize) -> Option<&Property> {
        self.results.get(position).map(|&idx| &self.store[idx])
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn price_bounds(&self) -> PriceRange {
        self.bounds
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn active_filters_count(&self) -> usize {
        self.state.active_count(self.bounds)
    }

    /// Number of filter passes run so far
    pub fn filter_passes(&self) -> u64 {
        self.filter_passes
    }

    pub fn has_pending_price(&self) -> bool {
        self.price_debounce.is_pending()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn store(&self) -> &[Property] {
        &self.store
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Request for the following page, carrying the current free-text query
    pub fn next_page(&self) -> Option<PageRequest> {
        let pagination = self.pagination.as_ref()?;
        PageRequest::next_after(pagination).map(|request| request.with_search(&self.search_query))
    }
}
