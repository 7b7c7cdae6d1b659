use crate::{
    fetcher::{FetchProfile, Fetcher},
    funpay::{ExtractedItem, ItemExtractor, ProbeReport, StructuralProber},
    utils, FetchError,
};
use std::sync::Arc;
use tracing::{error, info};

pub const PREVIEW_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPreview {
    pub preview: String,
    pub total_chars: usize,
    pub status: u16,
}

/// Fetch, then probe or extract. One request, no retries.
pub struct Hunter {
    fetcher: Arc<dyn Fetcher>,
    extractor: ItemExtractor,
    prober: StructuralProber,
    target_url: String,
}

impl Hunter {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: ItemExtractor,
        prober: StructuralProber,
        target_url: &str,
    ) -> Self {
        Hunter {
            fetcher,
            extractor,
            prober,
            target_url: target_url.to_string(),
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    async fn fetch_page(&self) -> Result<String, FetchError> {
        let response = self
            .fetcher
            .fetch(&self.target_url, FetchProfile::Content)
            .await?;
        if !response.is_ok() {
            return Err(FetchError::Status(response.status));
        }
        Ok(response.body)
    }

    /// Structural diagnostics, logged as they are computed.
    pub async fn debug(&self) -> Result<ProbeReport, FetchError> {
        info!("Debug parse of {}", self.target_url);
        let html = self.fetch_page().await.map_err(|e| {
            error!("Debug parse failed: {}", e);
            e
        })?;
        Ok(self.prober.probe(&html))
    }

    pub async fn parse(&self) -> Result<Vec<ExtractedItem>, FetchError> {
        info!("Parsing {}", self.target_url);
        let html = self.fetch_page().await.map_err(|e| {
            error!("Parse failed: {}", e);
            e
        })?;
        let items = self.extractor.extract(&html, &self.target_url);
        info!("Total items found: {}", items.len());
        Ok(items)
    }

    /// Any status is reported; only transport failures are errors.
    pub async fn preview(&self) -> Result<RawPreview, FetchError> {
        let response = self
            .fetcher
            .fetch(&self.target_url, FetchProfile::Preview)
            .await?;
        Ok(RawPreview {
            preview: utils::truncate_chars(&response.body, PREVIEW_CHARS),
            total_chars: utils::char_len(&response.body),
            status: response.status,
        })
    }
}
