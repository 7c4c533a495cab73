//! Resource retrieval: remote CSV/GeoJSON over HTTP, or local files.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::Source;
use crate::error::LoadError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches resources as text.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LoadError::Fetch {
                source_name: "http client".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Read the whole resource as UTF-8 text.
    pub fn fetch_text(&self, source: &Source) -> Result<String, LoadError> {
        match source {
            Source::Path(path) => {
                tracing::debug!(path = %path.display(), "reading local resource");
                std::fs::read_to_string(path).map_err(|e| LoadError::Fetch {
                    source_name: source.display(),
                    reason: e.to_string(),
                })
            }
            Source::Url(url) => self.fetch_url(url),
        }
    }

    fn fetch_url(&self, url: &str) -> Result<String, LoadError> {
        tracing::debug!(%url, "fetching remote resource");
        let fail = |reason: String| LoadError::Fetch {
            source_name: url.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| fail(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(fail(format!("request failed with status {}", resp.status())));
        }

        resp.text().map_err(|e| fail(format!("failed to read body: {e}")))
    }
}
