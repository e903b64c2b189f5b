//! Pagination module
//!
//! Cursor-driven listing generator over a pluggable [`Fetch`] seam.
//!
//! # Overview
//!
//! A [`ListingGenerator`] requests one page per refill, forwards the page's
//! `after` cursor into the next request, and stops on an item limit, an
//! empty page, or a cursor that is missing or repeats.

mod generator;
mod types;

pub use generator::ListingGenerator;
pub use types::{Fetch, GeneratorState, DEFAULT_ITEM_LIMIT, DEFAULT_PAGE_SIZE};

#[cfg(test)]
mod tests;
