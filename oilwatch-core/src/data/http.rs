//! Blocking HTTP client with a bounded timeout.

use super::provider::{DataError, HttpFetch};
use crate::config::HttpConfig;
use std::time::Duration;

/// [`HttpFetch`] backed by `reqwest::blocking`.
pub struct BlockingHttp {
    client: reqwest::blocking::Client,
}

impl BlockingHttp {
    pub fn new(config: &HttpConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpFetch for BlockingHttp {
    fn get_text(&self, url: &str) -> Result<String, DataError> {
        tracing::debug!(url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Transport(format!("HTTP {status} for {url}")));
        }

        // invalid UTF-8 is replaced, not rejected
        let bytes = resp
            .bytes()
            .map_err(|e| DataError::Transport(format!("reading body of {url}: {e}")))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
