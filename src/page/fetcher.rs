//! Page Fetcher Module
//!
//! The seam between the page cache and the network. [`HttpFetcher`] is
//! the production implementation; closures implement the trait too, so
//! tests can substitute a canned fetch.

use std::time::Duration;

use crate::error::Result;

// == Page Fetcher Trait ==
/// Fetches the text content of a URL.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<F> PageFetcher for F
where
    F: Fn(&str) -> Result<String>,
{
    fn fetch(&self, url: &str) -> Result<String> {
        self(url)
    }
}

// == Http Fetcher ==
/// Fetches pages with a plain blocking HTTP GET.
///
/// No headers, no auth, and no status-code handling: the response body
/// is returned as text whatever the status was.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a fetcher with the timeout from a [`Config`](crate::config::Config).
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Self::with_timeout(Duration::from_secs(config.fetch_timeout))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let body = self.client.get(url).send()?.text()?;
        Ok(body)
    }
}
