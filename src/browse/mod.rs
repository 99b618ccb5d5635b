//! Browse controller: trending/search state machine behind the home view
//!
//! The controller never performs I/O. Event handlers return a
//! [`FetchRequest`] whenever something has to be loaded, and the results are
//! fed back through [`BrowseController::on_trending_loaded`] and
//! [`BrowseController::on_search_page_loaded`] together with the generation
//! of the request they answer. Results of superseded requests are dropped.

use std::time::{Duration, Instant};

use crate::models::{CatalogItem, FilterCriteria, SearchPage};

pub mod debounce;
pub mod filter;

use debounce::Debouncer;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const COMPACT_PAGE_SIZE: usize = 6;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
/// Distance from the bottom at which the next search page is requested
pub const SCROLL_FETCH_THRESHOLD: f32 = 500.0;
/// Scroll offset above which the scroll-to-top button appears
pub const SCROLL_TOP_THRESHOLD: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Trending,
    Searching,
}

impl Mode {
    fn of_query(query: &str) -> Self {
        if query.trim().is_empty() {
            Mode::Trending
        } else {
            Mode::Searching
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowseConfig {
    /// Initial number of rendered trending items and "Load More" increment
    pub page_size: usize,
    pub debounce: Duration,
    pub scroll_fetch_threshold: f32,
}

impl BrowseConfig {
    pub fn new(compact_layout: bool, debounce: Duration) -> Self {
        Self {
            page_size: if compact_layout { COMPACT_PAGE_SIZE } else { DEFAULT_PAGE_SIZE },
            debounce,
            scroll_fetch_threshold: SCROLL_FETCH_THRESHOLD,
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self::new(false, DEFAULT_DEBOUNCE)
    }
}

/// A load the shell has to execute on behalf of the controller
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Trending { generation: u64 },
    Search { generation: u64, query: String, page: u32 },
}

impl FetchRequest {
    pub fn generation(&self) -> u64 {
        match self {
            FetchRequest::Trending { generation } | FetchRequest::Search { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FetchKind {
    Trending,
    SearchPage(u32),
}

/// The one request whose response is still awaited
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingFetch {
    generation: u64,
    kind: FetchKind,
}

/// Geometry of the scrolled result list
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl ScrollMetrics {
    pub fn distance_to_bottom(&self) -> f32 {
        (self.content_height - self.offset - self.viewport_height).max(0.0)
    }
}

#[derive(Debug)]
pub struct BrowseController {
    config: BrowseConfig,
    query: String,
    source_items: Vec<CatalogItem>,
    filters: FilterCriteria,
    // Indices into `source_items`, recomputed on every change of items or filters
    filtered: Vec<usize>,
    visible_count: usize,
    search_page_cursor: u32,
    has_more_search_results: bool,
    loading: bool,
    generation: u64,
    pending: Option<PendingFetch>,
    debouncer: Debouncer,
    show_scroll_to_top: bool,
    // Offset seen by the previous `on_scroll`
    last_scroll_offset: Option<f32>,
    // A loaded page added rows that were not rendered before
    rows_added: bool,
}

impl BrowseController {
    pub fn new(config: BrowseConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce);
        Self {
            visible_count: config.page_size,
            config,
            query: String::new(),
            source_items: Vec::new(),
            filters: FilterCriteria::default(),
            filtered: Vec::new(),
            search_page_cursor: 1,
            has_more_search_results: false,
            loading: false,
            generation: 0,
            pending: None,
            debouncer,
            show_scroll_to_top: false,
            last_scroll_offset: None,
            rows_added: false,
        }
    }

    pub fn config(&self) -> &BrowseConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        Mode::of_query(&self.query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn source_items(&self) -> &[CatalogItem] {
        &self.source_items
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn search_page_cursor(&self) -> u32 {
        self.search_page_cursor
    }

    pub fn has_more_search_results(&self) -> bool {
        self.has_more_search_results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_scroll_to_top(&self) -> bool {
        self.show_scroll_to_top
    }

    /// When the shell should call [`Self::poll`] next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Number of loaded items passing the current filters
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The items to render: every filtered search result, or the first
    /// `visible_count` filtered trending items
    pub fn visible_items(&self) -> impl Iterator<Item = &CatalogItem> + '_ {
        let limit = match self.mode() {
            Mode::Trending => self.visible_count,
            Mode::Searching => usize::MAX,
        };
        self.filtered
            .iter()
            .take(limit)
            .map(move |&idx| &self.source_items[idx])
    }

    /// Whether the "Load More" button applies
    pub fn can_load_more(&self) -> bool {
        self.mode() == Mode::Trending && self.visible_count < self.filtered.len()
    }

    /// Initial load when the home view is mounted
    pub fn mount(&mut self) -> FetchRequest {
        self.debouncer.cancel();
        self.issue(FetchKind::Trending)
    }

    /// Record a keystroke. Nothing is requested until [`Self::poll`] sees
    /// the input settle.
    pub fn on_query_changed(&mut self, query: impl Into<String>, now: Instant) {
        let query = query.into();
        let previous_mode = self.mode();
        self.query = query;
        let mode = self.mode();
        if mode != previous_mode {
            log::debug!("Switching from {:?} to {:?} mode", previous_mode, mode);
            self.reset_pagination();
        }
        // Anything issued before this keystroke answers an outdated query
        if let Some(pending) = self.pending.take() {
            log::debug!("Invalidating in-flight request {:?}", pending);
            self.loading = false;
        }
        self.debouncer.schedule(now);
    }

    /// Issue the request for the settled query once the debounce interval
    /// has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
        if !self.debouncer.fire(now) {
            return None;
        }
        let request = match self.mode() {
            Mode::Trending => self.issue(FetchKind::Trending),
            Mode::Searching => self.issue(FetchKind::SearchPage(1)),
        };
        Some(request)
    }

    pub fn on_trending_loaded(&mut self, generation: u64, items: Vec<CatalogItem>) -> bool {
        if self.pending != Some(PendingFetch { generation, kind: FetchKind::Trending }) {
            log::debug!("Discarding stale trending response (generation {})", generation);
            return false;
        }
        self.pending = None;
        self.loading = false;
        log::info!("Loaded {} trending movies", items.len());
        self.source_items = items;
        self.search_page_cursor = 1;
        self.has_more_search_results = false;
        self.visible_count = self.config.page_size;
        self.refilter();
        true
    }

    pub fn on_search_page_loaded(&mut self, generation: u64, page: SearchPage) -> bool {
        let requested_page = match self.pending {
            Some(PendingFetch { generation: pending, kind: FetchKind::SearchPage(requested) })
                if pending == generation =>
            {
                requested
            }
            _ => {
                log::debug!("Discarding stale search response (generation {})", generation);
                return false;
            }
        };
        self.pending = None;
        self.loading = false;

        let received = page.items.len();
        let items: Vec<CatalogItem> = page
            .items
            .into_iter()
            .filter(CatalogItem::passes_quality_check)
            .collect();
        log::info!(
            "Loaded search page {}/{} for '{}': {} of {} results kept",
            requested_page,
            page.total_pages,
            self.query.trim(),
            items.len(),
            received
        );
        let shown_before = if requested_page <= 1 { 0 } else { self.filtered.len() };
        if requested_page <= 1 {
            self.source_items = items;
        } else {
            self.source_items.extend(items);
        }
        self.search_page_cursor = requested_page + 1;
        self.has_more_search_results = self.search_page_cursor <= page.total_pages;
        self.refilter();
        self.rows_added = self.filtered.len() > shown_before;
        true
    }

    /// Track the scroll position and request the next search page near the
    /// bottom of the list.
    ///
    /// Called every frame. A page is only requested when the offset moved
    /// since the previous call or the last loaded page added visible rows.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<FetchRequest> {
        self.show_scroll_to_top = metrics.offset > SCROLL_TOP_THRESHOLD;
        let moved = self.last_scroll_offset != Some(metrics.offset);
        self.last_scroll_offset = Some(metrics.offset);
        let rows_added = std::mem::take(&mut self.rows_added);
        let triggered = moved || rows_added;
        let near_bottom = metrics.distance_to_bottom() <= self.config.scroll_fetch_threshold;
        if !triggered
            || self.mode() != Mode::Searching
            || self.loading
            || self.debouncer.is_pending()
            || !self.has_more_search_results
            || !near_bottom
        {
            return None;
        }
        let page = self.search_page_cursor;
        Some(self.issue(FetchKind::SearchPage(page)))
    }

    pub fn set_filters(&mut self, filters: FilterCriteria) -> bool {
        if filters == self.filters {
            return false;
        }
        log::debug!("Filters changed: {:?}", filters);
        self.filters = filters;
        if self.mode() == Mode::Trending {
            self.visible_count = self.config.page_size;
        }
        self.refilter();
        true
    }

    /// Show the next chunk of trending items
    pub fn load_more(&mut self) -> bool {
        if !self.can_load_more() {
            return false;
        }
        self.visible_count += self.config.page_size;
        true
    }

    fn issue(&mut self, kind: FetchKind) -> FetchRequest {
        self.generation += 1;
        let generation = self.generation;
        let request = match kind {
            FetchKind::Trending => FetchRequest::Trending { generation },
            FetchKind::SearchPage(page) => FetchRequest::Search {
                generation,
                query: self.query.trim().to_string(),
                page,
            },
        };
        log::debug!("Issuing {:?}", request);
        self.pending = Some(PendingFetch { generation, kind });
        self.loading = true;
        request
    }

    fn reset_pagination(&mut self) {
        self.visible_count = self.config.page_size;
        self.search_page_cursor = 1;
        self.has_more_search_results = false;
    }

    fn refilter(&mut self) {
        self.filtered = filter::filter_indices(&self.source_items, &self.filters);
    }
}

#[cfg(test)]
#[path = "browse_tests.rs"]
mod tests;
