use crate::{utils, CandidateFinder, ConfigError};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref DIV: Selector = Selector::parse("div").expect(E);
}

/// Elements matching one CSS selector, in document order, capped at `limit`.
#[derive(Debug)]
pub struct SelectorFinder {
    source: String,
    selector: Selector,
    limit: usize,
}

impl SelectorFinder {
    pub fn new(selector: &str, limit: usize) -> Result<Self, ConfigError> {
        Ok(SelectorFinder {
            source: selector.to_string(),
            selector: utils::compile_selector(selector)?,
            limit,
        })
    }
}

impl CandidateFinder for SelectorFinder {
    fn name(&self) -> &str {
        &self.source
    }

    fn find<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        doc.select(&self.selector).take(self.limit).collect()
    }
}

/// Generic scan over the first `scan_limit` divs, keeping those whose text
/// looks like it carries a price.
#[derive(Debug)]
pub struct FallbackFinder {
    scan_limit: usize,
    min_text_len: usize,
    markers: Vec<String>,
}

impl FallbackFinder {
    pub fn new(scan_limit: usize, min_text_len: usize, markers: &[String]) -> Self {
        FallbackFinder {
            scan_limit,
            min_text_len,
            markers: markers.iter().map(|m| m.to_lowercase()).collect(),
        }
    }
}

impl CandidateFinder for FallbackFinder {
    fn name(&self) -> &str {
        "fallback div scan"
    }

    fn find<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        doc.select(&DIV)
            .take(self.scan_limit)
            .filter(|div| {
                let text = utils::block_text(*div);
                utils::char_len(&text) > self.min_text_len
                    && utils::contains_keyword(&text, &self.markers)
            })
            .collect()
    }
}
