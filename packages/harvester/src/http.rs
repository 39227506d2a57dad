//! HTTP fetching of listing and detail pages.

use reqwest::blocking::Client;

use crate::config::USER_AGENT;
use crate::error::{HarvesterError, Result};

/// Something that can fetch a page as text.
///
/// The harvester only ever performs plain GET requests; implementations for
/// tests serve fixture HTML from memory.
pub trait Fetch {
    /// Fetch `url` and return its body.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Create a configured HTTP client.
///
/// No timeout is set beyond the client default and requests are never
/// retried: a failed fetch aborts the run.
pub fn create_client() -> Result<Client> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}

/// Blocking HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Fetching");

        let wrap = |source| HarvesterError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(wrap)?;

        response.text().map_err(wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }
}
