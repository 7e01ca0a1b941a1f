use crate::error::Result;
use crate::http_client::build_http_client;
use std::time::Duration;

/// Raw response of a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Performs single GET requests bounded by the configured timeout. No retries.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
        })
    }

    /// Fetches `url`. Network errors, timeouts and 4xx/5xx statuses are all
    /// returned as errors whose `Display` text becomes the broken-link reason.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let status = response.status().as_u16();

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());

        if let Some(ct) = content_type {
            let ct_lower = ct.to_lowercase();
            if !ct_lower.contains("text/html") && !ct_lower.contains("application/xhtml") {
                tracing::debug!(url = %url, content_type = %ct, "Non-HTML content type");
            }
        }

        let body = response.bytes().await?.to_vec();

        Ok(FetchedPage { status, body })
    }
}
