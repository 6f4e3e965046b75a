// src/core/net.rs
// Blocking HTTP GET. One request per page, no retries.

use reqwest::blocking::Client;

use crate::config::options::FetchOptions;
use crate::error::{Error, Result};

/// Source of raw page bytes. The runner only talks to this seam, so tests
/// can serve fixture pages without a network.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(opts.user_agent.clone())
            .timeout(opts.timeout)
            .build()
            .map_err(|source| Error::Fetch { url: s!("<client>"), source })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let fail = |source| Error::Fetch { url: s!(url), source };

        let resp = self.client.get(url).send().map_err(fail)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { url: s!(url), status: status.as_u16() });
        }
        let body = resp.bytes().map_err(fail)?;
        logd!("GET {url}: {} bytes", body.len());
        Ok(body.to_vec())
    }
}
