//! Pagination types and traits
//!
//! Defines the fetch seam the generator is built on and its observable state.

use crate::error::Result;
use crate::listing::ListingResponse;
use crate::types::RequestParams;

/// Number of items a generator yields when no limit is chosen
pub const DEFAULT_ITEM_LIMIT: usize = 100;

/// Page size hint sent when the generator has no item limit
pub const DEFAULT_PAGE_SIZE: usize = 1024;

/// Performs one listing request
///
/// Implementations block until the response is decoded. They must not retry
/// on their own behalf: errors are handed to the generator, which passes them
/// to its caller untouched.
pub trait Fetch {
    /// GET `url` with `params` and decode the listing response
    fn fetch(&mut self, url: &str, params: &RequestParams) -> Result<ListingResponse>;
}

impl<F> Fetch for F
where
    F: FnMut(&str, &RequestParams) -> Result<ListingResponse>,
{
    fn fetch(&mut self, url: &str, params: &RequestParams) -> Result<ListingResponse> {
        self(url, params)
    }
}

/// Where a generator is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Nothing fetched yet
    Fresh,
    /// Items buffered, or more pages may follow
    Active,
    /// The item limit has been yielded
    LimitReached,
    /// The server has no further pages and the buffer is drained
    Exhausted,
}

impl GeneratorState {
    /// Check if no further items will ever be produced
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::LimitReached | Self::Exhausted)
    }
}
