use super::{ExtractedItem, FallbackFinder, SelectorFinder};
use crate::{config::ExtractorConfig, utils, CandidateFinder, ConfigError, ParseDegradation};
use lazy_regex::Regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

const E: &str = "Invalid selector";
lazy_static! {
    static ref A: Selector = Selector::parse("a").expect(E);
}

pub struct ItemExtractor {
    finders: Vec<Box<dyn CandidateFinder>>,
    fallback: Box<dyn CandidateFinder>,
    keywords: Vec<String>,
    strict_price: Regex,
    loose_price: Regex,
    min_price: u64,
    max_price: u64,
    evaluation_limit: usize,
    min_text_len: usize,
    title_len: usize,
    full_text_len: usize,
}

impl ItemExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        let finders = config
            .candidate_selectors
            .iter()
            .map(|s| {
                SelectorFinder::new(s, config.per_selector_limit)
                    .map(|f| Box::new(f) as Box<dyn CandidateFinder>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ItemExtractor {
            finders,
            fallback: Box::new(FallbackFinder::new(
                config.fallback_scan_limit,
                config.fallback_min_text_len,
                &config.fallback_markers,
            )),
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
            strict_price: utils::compile_pattern(&config.strict_price_pattern)?,
            loose_price: utils::compile_pattern(&config.loose_price_pattern)?,
            min_price: config.min_price,
            max_price: config.max_price,
            evaluation_limit: config.evaluation_limit,
            min_text_len: config.min_text_len,
            title_len: config.title_len,
            full_text_len: config.full_text_len,
        })
    }

    /// Replaces the prioritized strategies. An empty list sends every
    /// document straight to the fallback scan.
    pub fn with_finders(mut self, finders: Vec<Box<dyn CandidateFinder>>) -> Self {
        self.finders = finders;
        self
    }

    pub fn extract(&self, html: &str, page_url: &str) -> Vec<ExtractedItem> {
        let doc = Html::parse_document(html);
        self.extract_document(&doc, page_url)
    }

    pub fn extract_document(&self, doc: &Html, page_url: &str) -> Vec<ExtractedItem> {
        let candidates = self.candidates(doc);
        debug!("Potential items found: {}", candidates.len());

        if candidates.is_empty() {
            debug!("{}", ParseDegradation::NoCandidates);
            return vec![];
        }

        let evaluated = candidates.len().min(self.evaluation_limit);
        let items: Vec<ExtractedItem> = candidates
            .into_iter()
            .take(self.evaluation_limit)
            .filter_map(|block| self.evaluate(block, page_url))
            .collect();

        if items.is_empty() {
            debug!("{}", ParseDegradation::NoItems(evaluated));
        }
        for item in &items {
            debug!("\n{}", item);
        }
        info!("Items found: {}", items.len());
        items
    }

    fn candidates<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        let mut pool = vec![];
        for finder in &self.finders {
            let found = finder.find(doc);
            if !found.is_empty() {
                debug!(finder = finder.name(), count = found.len(), "Candidates");
            }
            pool.extend(found);
        }

        if pool.is_empty() {
            pool = self.fallback.find(doc);
            debug!(finder = self.fallback.name(), count = pool.len(), "Candidates");
        }
        pool
    }

    fn evaluate(&self, block: ElementRef<'_>, page_url: &str) -> Option<ExtractedItem> {
        let text = utils::block_text(block);
        if text.is_empty() || utils::char_len(&text) < self.min_text_len {
            return None;
        }

        if !utils::contains_keyword(&text, &self.keywords) {
            return None;
        }

        let price = utils::parse_price(&text, &self.strict_price, &self.loose_price)?;
        if price < self.min_price || price > self.max_price {
            return None;
        }

        // Nested anchors only; a candidate that is itself an anchor does not count.
        let href = block
            .select(&A)
            .find(|a| a.id() != block.id())
            .and_then(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty());
        let link = utils::resolve_link(href, page_url);

        let title = utils::truncate_chars(&text, self.title_len);
        info!(
            "Item found: '{}...' - {} руб.",
            utils::truncate_chars(&title, 50),
            price
        );

        Some(ExtractedItem {
            id: utils::fingerprint(&text, price),
            full_text: utils::truncate_chars(&text, self.full_text_len),
            title,
            price,
            link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const PAGE: &str = "https://funpay.com/chips/186/";

    fn extractor() -> ItemExtractor {
        ItemExtractor::new(&ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn single_offer_end_to_end() {
        let html = r#"<html><body>
            <div class="tc-item"><a href="/offer/9">Black Russia чипы, цена 500 руб, подробнее</a></div>
        </body></html>"#;

        let items = extractor().extract(html, PAGE);
        // Matched by both `div[class*="item"]` and `div.tc-item`.
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], items[1]);

        let item = &items[0];
        assert_eq!(item.price, 500);
        assert_eq!(item.link, "https://funpay.com/offer/9");
        assert_eq!(item.title, "Black Russia чипы, цена 500 руб, подробнее");
        assert_eq!(item.full_text, item.title);
        assert_eq!(item.id, utils::fingerprint(&item.title, 500));
    }

    #[test]
    fn single_offer_through_fallback() {
        let html = r#"<div><a href="/offer/9">Black Russia чипы, цена 500 руб, подробнее</a></div>"#;
        let items = extractor().extract(html, PAGE);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, 500);
        assert_eq!(items[0].link, "https://funpay.com/offer/9");
    }

    #[test]
    fn price_band_is_inclusive() {
        let block = |price: u32| {
            format!(r#"<div class="offer">Black Russia виртуалка {} руб</div>"#, price)
        };
        let prices = |html: String| -> Vec<u64> {
            extractor().extract(&html, PAGE).iter().map(|i| i.price).collect()
        };
        assert_eq!(prices(block(10)), vec![10]);
        assert_eq!(prices(block(50000)), vec![50000]);
        assert!(prices(block(9)).is_empty());
        assert!(prices(block(50001)).is_empty());
    }

    #[test]
    fn fullwidth_price() {
        let html = r#"<div class="offer">Black Russia лот ５００ руб</div>"#;
        let items = extractor().extract(html, PAGE);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, 500);
    }

    #[test]
    fn keyword_required() {
        let html = r#"<div class="offer">Arizona RP виртуалка 500 руб</div>
                      <div class="offer">BlackRussia сервер 01, 700 руб</div>"#;
        let items = extractor().extract(html, PAGE);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, 700);
    }

    #[test]
    fn short_text_and_missing_price_are_skipped() {
        let html = r#"<div class="offer">BR 50 руб</div>
                      <div class="offer">Black Russia без цены</div>
                      <div class="offer">Black Russia в наличии, 1 шт</div>"#;
        assert!(extractor().extract(html, PAGE).is_empty());
    }

    #[test]
    fn links_fall_back_to_page() {
        let html = r#"<div class="offer">Black Russia виртуалка 500 руб</div>
                      <div class="offer"><a href="https://other.com/x">Black Russia 600 руб</a></div>
                      <div class="offer"><a href="">Black Russia 700 руб</a></div>
                      <a class="product" href="/lot/1">Black Russia 800 руб</a>"#;
        let links: Vec<String> = extractor()
            .extract(html, PAGE)
            .into_iter()
            .map(|i| i.link)
            .collect();
        assert_eq!(links, vec![PAGE, "https://other.com/x", PAGE, PAGE]);
    }

    #[test]
    fn evaluation_is_capped() {
        let html = (1..=25)
            .map(|i| format!(r#"<div class="offer">Black Russia лот {} руб</div>"#, 100 + i))
            .collect::<String>();
        let config = ExtractorConfig {
            per_selector_limit: 30,
            ..ExtractorConfig::default()
        };
        let items = ItemExtractor::new(&config).unwrap().extract(&html, PAGE);
        assert_eq!(items.len(), 20);
        assert_eq!(items.last().map(|i| i.price), Some(120));
    }

    #[test]
    fn pool_preserves_selector_order() {
        let html = r#"<a class="item-link">Black Russia 300 руб</a>
                      <div class="offer">Black Russia 200 руб</div>
                      <div class="product">Black Russia 100 руб</div>"#;
        let prices: Vec<u64> = extractor()
            .extract(html, PAGE)
            .iter()
            .map(|i| i.price)
            .collect();
        assert_eq!(prices, vec![100, 200, 300]);
    }

    #[test]
    fn degenerate_documents_yield_nothing() {
        assert!(extractor().extract("", PAGE).is_empty());
        assert!(extractor().extract("<<<div class=>>< /a>", PAGE).is_empty());
        assert!(extractor().extract("\u{0}\u{fffd}", PAGE).is_empty());
    }

    #[test]
    fn custom_finders_replace_selectors() {
        let html = r#"<section><p class="x">Black Russia 900 руб, продам</p></section>"#;
        let finder = SelectorFinder::new("p.x", 10).unwrap();
        let items = extractor()
            .with_finders(vec![Box::new(finder)])
            .extract(html, PAGE);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, 900);
    }

    #[test]
    fn listing_fixture() {
        let html = fs::read_to_string("tests/htmls/listing.html").expect("Invalid file url");
        let items = extractor().extract(&html, PAGE);

        let summary: Vec<(u64, String)> = items.iter().map(|i| (i.price, i.link.clone())).collect();
        assert_eq!(
            summary,
            vec![
                (150, "https://funpay.com/chips/offer?id=101".to_string()),
                (4200, "https://funpay.com/chips/offer?id=103".to_string()),
            ]
        );
        assert!(items[0].title.starts_with("Black Russia"));
    }
}
