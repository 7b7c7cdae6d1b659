use scraper::{ElementRef, Html};

pub mod config;
pub mod fetcher;
pub mod funpay;
pub mod hunter;
pub mod web;

mod error;
mod utils;

pub use error::{ConfigError, FetchError, HunterError, ParseDegradation};

/// One way of locating candidate listing blocks in a page. Strategies are
/// tried in order and their results pooled before any content filtering.
pub trait CandidateFinder: Send + Sync {
    fn name(&self) -> &str;
    fn find<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>>;
}
