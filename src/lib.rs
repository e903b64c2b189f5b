//! # listing-pager
//!
//! Lazy, cursor-based pagination over Reddit-style listing endpoints.
//!
//! ## Features
//!
//! - **Lazy iteration**: pages are requested only when the next item is needed
//! - **Cursor protocol**: follows `after` cursors and stops when they run out or repeat
//! - **Item limits**: caps the total number of items independently of page size
//! - **Response shapes**: bare listings, submission duplicates, flair listings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listing_pager::{HttpFetcher, ListingGenerator, PagerConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = PagerConfig::default();
//!     let fetcher = HttpFetcher::new(config.http_config())?;
//!
//!     let generator = ListingGenerator::new(fetcher, "/r/rust/new.json").with_limit(Some(250));
//!     for item in generator {
//!         println!("{:?}", item?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ ListingGenerator: next_item() / Iterator     │
//! │   limit check → refill → pop buffered item   │
//! └──────────────────────┬───────────────────────┘
//!                        │ Fetch::fetch(url, params)
//! ┌──────────────────────┴───────────────────────┐
//! │ ListingResponse: Bare | Duplicates | Flair   │
//! │   → Page { items, after }                    │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────┐
//! │ HttpFetcher → HttpClient (reqwest)           │
//! └──────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Listing response shapes and pages
pub mod listing;

/// Listing generator and the fetch seam
pub mod pagination;

/// HTTP client and blocking fetcher
pub mod http;

/// Pager configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PagerConfig;
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, HttpFetcher};
pub use listing::{ListingItem, ListingResponse, Page};
pub use pagination::{Fetch, GeneratorState, ListingGenerator};
pub use types::{ParamValue, RequestParams};
