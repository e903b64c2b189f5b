//! Blocking listing fetcher over the async client

use super::client::{HttpClient, HttpClientConfig, RequestConfig};
use crate::error::{Error, Result};
use crate::listing::ListingResponse;
use crate::pagination::Fetch;
use crate::types::{JsonValue, RequestParams};
use tokio::runtime::{Builder, Handle, Runtime};

/// Fetches listing pages over HTTP, blocking the calling thread
///
/// Owns a current-thread tokio runtime and drives one request to completion
/// per [`Fetch::fetch`] call. It refuses to run from inside another async
/// runtime, where blocking would stall that runtime's worker.
pub struct HttpFetcher {
    client: HttpClient,
    runtime: Runtime,
}

impl HttpFetcher {
    /// Create a fetcher with its own client and runtime
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Self::with_client(HttpClient::with_config(config)?)
    }

    /// Create a fetcher around an existing client
    pub fn with_client(client: HttpClient) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { client, runtime })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&mut self, url: &str, params: &RequestParams) -> Result<ListingResponse> {
        if Handle::try_current().is_ok() {
            return Err(Error::runtime(
                "HttpFetcher blocks the thread and cannot be used inside an async runtime",
            ));
        }

        let body: JsonValue = self.runtime.block_on(
            self.client
                .get_json_with_config(url, RequestConfig::from_params(params)),
        )?;
        ListingResponse::from_value(body)
    }
}

/// Lets a generator borrow a fetcher that outlives it
impl Fetch for &mut HttpFetcher {
    fn fetch(&mut self, url: &str, params: &RequestParams) -> Result<ListingResponse> {
        <HttpFetcher as Fetch>::fetch(self, url, params)
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
