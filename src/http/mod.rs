//! HTTP client module
//!
//! Provides the async HTTP client and the blocking fetcher that feeds
//! listing generators.
//!
//! # Features
//!
//! - **Base URL joining**: relative listing paths resolve against a base URL
//! - **Typed status errors**: non-2xx responses become `Error::HttpStatus`
//! - **Blocking fetch**: `HttpFetcher` implements `Fetch` on its own runtime

mod client;
mod fetcher;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use fetcher::HttpFetcher;
