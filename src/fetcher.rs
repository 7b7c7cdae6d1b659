use crate::FetchError;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::time::Duration;
use tracing::debug;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const PREVIEW_USER_AGENT: &str = "Mozilla/5.0";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchProfile {
    /// Full page for probing and extraction.
    Content,
    /// Raw preview, shorter timeout and a bare User-Agent.
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Any HTTP response is `Ok`, whatever its status. Only transport failures are errors.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, profile: FetchProfile) -> Result<FetchResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    content_timeout: Duration,
    preview_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(content_timeout: Duration, preview_timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(HttpFetcher {
            client,
            content_timeout,
            preview_timeout,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, profile: FetchProfile) -> Result<FetchResponse, FetchError> {
        let request = match profile {
            FetchProfile::Content => self
                .client
                .get(url)
                .header(USER_AGENT, BROWSER_USER_AGENT)
                .header(ACCEPT, BROWSER_ACCEPT)
                .timeout(self.content_timeout),
            FetchProfile::Preview => self
                .client
                .get(url)
                .header(USER_AGENT, PREVIEW_USER_AGENT)
                .timeout(self.preview_timeout),
        };
        let timeout_secs = match profile {
            FetchProfile::Content => self.content_timeout.as_secs(),
            FetchProfile::Preview => self.preview_timeout.as_secs(),
        };

        debug!("Visit {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout_secs))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout_secs))?;
        debug!(status, length = body.len(), "Fetched {}", url);

        Ok(FetchResponse { status, body })
    }
}
