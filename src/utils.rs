use crate::error::ConfigError;
use lazy_regex::{regex, Regex};
use scraper::{ElementRef, Selector};
use sha2::{Digest, Sha256};
use std::num::IntErrorKind;
use unicode_normalization::UnicodeNormalization;

pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Every text node under `el`, trimmed, concatenated without a separator.
pub fn block_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

pub fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// `keywords` are expected lowercase already.
pub fn contains_keyword<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|k| text.contains(k.as_ref()))
}

/// Digits followed by a currency unit win over the first bare run of digits.
/// The strict pattern must capture the amount in group 1.
pub fn parse_price(text: &str, strict: &Regex, loose: &Regex) -> Option<u64> {
    let digits = match strict.captures(text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => loose.find(text)?.as_str(),
    };
    // `\d` is Unicode-aware; NFKC folds fullwidth digits to ASCII.
    let digits = digits.nfkc().collect::<String>();
    match digits.parse::<u64>() {
        Ok(price) => Some(price),
        // Out of band either way.
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

/// Root-relative hrefs are joined with the page origin, absolute ones kept,
/// anything else falls back to the page itself.
pub fn resolve_link(href: Option<&str>, page_url: &str) -> String {
    match href {
        Some(href) if href.starts_with('/') => match reqwest::Url::parse(page_url) {
            Ok(url) => format!("{}{}", url.origin().ascii_serialization(), href),
            Err(_) => page_url.to_string(),
        },
        Some(href) if href.starts_with("http") => href.to_string(),
        _ => page_url.to_string(),
    }
}

pub fn fingerprint(text: &str, price: u64) -> String {
    let normalized = regex!(r"\s+").replace_all(text.trim(), " ");
    let digest = Sha256::digest(normalized.as_bytes());
    let hex = format!("{:x}", digest);
    format!("{}_{}", &hex[..16], price)
}
