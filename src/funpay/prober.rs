use crate::{config::ExtractorConfig, utils, ConfigError};
use itertools::Itertools;
use lazy_regex::Regex;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::info;

const E: &str = "Invalid selector";
lazy_static! {
    static ref DIV: Selector = Selector::parse("div").expect(E);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCount {
    pub class_name: String,
    pub count: usize,
    /// Truncated markup of the first element carrying the class.
    pub first_snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeReport {
    pub div_count: usize,
    pub class_counts: Vec<ClassCount>,
    pub keyword_present: bool,
    pub price_samples: Vec<String>,
}

/// Read-only structural diagnostics over a listing page. Produces no items.
pub struct StructuralProber {
    classes: Vec<(String, Selector)>,
    keywords: Vec<String>,
    price_pattern: Regex,
    price_samples: usize,
    snippet_len: usize,
}

impl StructuralProber {
    pub fn new(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        let classes = config
            .probe_class_names
            .iter()
            .map(|name| {
                let selector = utils::compile_selector(&format!(".{}", name))?;
                Ok::<_, ConfigError>((name.clone(), selector))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StructuralProber {
            classes,
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
            price_pattern: utils::compile_pattern(&config.probe_price_pattern)?,
            price_samples: config.probe_price_samples,
            snippet_len: config.probe_snippet_len,
        })
    }

    pub fn probe(&self, html: &str) -> ProbeReport {
        let doc = Html::parse_document(html);
        self.probe_document(&doc)
    }

    pub fn probe_document(&self, doc: &Html) -> ProbeReport {
        info!("Page structure analysis:");

        let div_count = doc.select(&DIV).count();
        info!("   Total div elements: {}", div_count);

        let class_counts: Vec<ClassCount> = self
            .classes
            .iter()
            .map(|(class_name, selector)| {
                let mut matches = doc.select(selector);
                let first = matches.next();
                let count = first.map_or(0, |_| 1 + matches.count());
                ClassCount {
                    class_name: class_name.clone(),
                    count,
                    first_snippet: first
                        .map(|el| utils::truncate_chars(&el.html(), self.snippet_len)),
                }
            })
            .collect();

        for class in class_counts.iter().filter(|c| c.count > 0) {
            info!("   Elements with class '{}': {}", class.class_name, class.count);
            if let Some(snippet) = &class.first_snippet {
                info!("   First element:\n{}", snippet);
            }
        }
        info!(
            "   Class summary: {}",
            class_counts
                .iter()
                .map(|c| format!("{}={}", c.class_name, c.count))
                .join(", ")
        );

        let flattened = doc.root_element().text().collect::<String>();
        let keyword_present = utils::contains_keyword(&flattened, &self.keywords);
        if keyword_present {
            info!("   Keyword mentioned on the page");
        } else {
            info!("   Keyword NOT mentioned on the page");
        }

        let price_samples: Vec<String> = doc
            .root_element()
            .text()
            .filter(|t| self.price_pattern.is_match(t))
            .take(self.price_samples)
            .map(|t| t.trim().to_string())
            .collect();
        if !price_samples.is_empty() {
            info!("   Price-like fragments:");
            for (i, price) in price_samples.iter().enumerate() {
                info!("   Price {}: {}", i + 1, price);
            }
        }

        ProbeReport {
            div_count,
            class_counts,
            keyword_present,
            price_samples,
        }
    }
}
