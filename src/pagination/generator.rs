//! Lazy listing generator
//!
//! Pulls listing pages on demand and yields their items one at a time.

use super::types::{Fetch, GeneratorState, DEFAULT_ITEM_LIMIT, DEFAULT_PAGE_SIZE};
use crate::error::Result;
use crate::listing::ListingItem;
use crate::types::{RequestParams, LIMIT_PARAM};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::debug;

/// Yields the items of a paginated listing, fetching pages as needed
///
/// Nothing is fetched until the first item is requested. Each refill makes
/// exactly one call to the fetcher. Iteration ends for good when `limit`
/// items have been yielded, when a page comes back empty, or once the page
/// whose `after` cursor is missing or repeats the requested one is drained.
///
/// ```rust,ignore
/// let fetcher = HttpFetcher::new(HttpClientConfig::default())?;
/// let generator = ListingGenerator::new(fetcher, "https://www.reddit.com/r/rust/new.json")
///     .with_limit(Some(250));
/// for item in generator {
///     println!("{:?}", item?);
/// }
/// ```
#[derive(Debug)]
pub struct ListingGenerator<F> {
    fetcher: F,
    url: String,
    limit: Option<usize>,
    default_page_size: usize,
    params: RequestParams,
    buffer: VecDeque<ListingItem>,
    yielded: usize,
    pages: usize,
    exhausted: bool,
}

impl<F: Fetch> ListingGenerator<F> {
    /// Create a generator for `url` that yields at most 100 items
    pub fn new(fetcher: F, url: impl Into<String>) -> Self {
        let mut generator = Self {
            fetcher,
            url: url.into(),
            limit: Some(DEFAULT_ITEM_LIMIT),
            default_page_size: DEFAULT_PAGE_SIZE,
            params: RequestParams::new(),
            buffer: VecDeque::new(),
            yielded: 0,
            pages: 0,
            exhausted: false,
        };
        generator.sync_page_size();
        generator
    }

    /// Set the item limit; `None` yields until the server runs out
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.sync_page_size();
        self
    }

    /// Set extra query parameters; any `limit` entry is replaced by the page size
    #[must_use]
    pub fn with_params(mut self, params: RequestParams) -> Self {
        self.params = params;
        self.sync_page_size();
        self
    }

    /// Set the page size requested when there is no item limit
    #[must_use]
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self.sync_page_size();
        self
    }

    /// Produce the next item, or `Ok(None)` once the listing is finished
    ///
    /// A failed fetch leaves the generator as it was, so calling this again
    /// repeats the same request.
    pub fn next_item(&mut self) -> Result<Option<ListingItem>> {
        if self.limit_reached() {
            return Ok(None);
        }

        if self.buffer.is_empty() && !self.fill_buffer()? {
            return Ok(None);
        }

        let Some(item) = self.buffer.pop_front() else {
            return Ok(None);
        };
        self.yielded += 1;
        Ok(Some(item))
    }

    /// Fetch the next page into the buffer
    ///
    /// Returns `false` when there is nothing more to read.
    fn fill_buffer(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }

        debug!(
            "Fetching page {} of {} (after: {:?})",
            self.pages + 1,
            self.url,
            self.params.after()
        );
        let response = self.fetcher.fetch(&self.url, &self.params)?;
        let shape = response.shape();
        let page = response.into_page();
        self.pages += 1;

        debug!(
            "Received {} page with {} items (after: {:?})",
            shape,
            page.len(),
            page.after()
        );

        if page.is_empty() {
            self.exhausted = true;
            return Ok(false);
        }

        match page.after() {
            Some(after) if Some(after) != self.params.after() => {
                self.params = self.params.with_after(after);
            }
            _ => {
                debug!("Listing {} has no further pages", self.url);
                self.exhausted = true;
            }
        }

        self.buffer = page.into_items().into();
        Ok(true)
    }

    fn sync_page_size(&mut self) {
        let page_size = match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => self.default_page_size,
        };
        self.params.insert(LIMIT_PARAM, page_size);
    }
}

impl<F> ListingGenerator<F> {
    /// Endpoint every page is requested from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Maximum number of items this generator yields
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Parameters the next request will be sent with
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Items returned so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Check if the server has signalled the last page
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Borrow the fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Consume the generator and return its fetcher
    pub fn into_fetcher(self) -> F {
        self.fetcher
    }

    /// Current lifecycle state
    pub fn state(&self) -> GeneratorState {
        if self.limit_reached() {
            GeneratorState::LimitReached
        } else if self.pages == 0 {
            GeneratorState::Fresh
        } else if self.exhausted && self.buffer.is_empty() {
            GeneratorState::Exhausted
        } else {
            GeneratorState::Active
        }
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.yielded >= limit)
    }

    fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.yielded))
    }
}

impl<F: Fetch> Iterator for ListingGenerator<F> {
    type Item = Result<ListingItem>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_item().transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self
            .remaining()
            .map_or(self.buffer.len(), |r| r.min(self.buffer.len()));

        // Failed refills yield errors, so only a drained listing is bounded
        if self.exhausted {
            (buffered, Some(buffered))
        } else {
            (buffered, None)
        }
    }
}

impl<F: Fetch> FusedIterator for ListingGenerator<F> {}
