// src/core/net.rs

// Blocking HTTP GET. Sources are fetched one after another, so there is no
// runtime to drive; every request is bounded by the client timeout.

use std::time::Duration;

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

/// Resolve a URL to its body text. The pipeline only talks to sources through
/// this trait, so tests can hand it canned pages.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<String, FetchError>,
{
    fn get(&self, url: &str) -> Result<String, FetchError> {
        self(url)
    }
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport { url: s!(url), source };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }
        logd!("GET {url} -> {status}");
        resp.text().map_err(transport)
    }
}
