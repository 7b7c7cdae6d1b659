use crate::error::ConfigError;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "https://funpay.com/chips/186/";

#[derive(Debug, Clone, Parser)]
#[command(name = "funpay-hunter", about = "Debug views over a FunPay listing scraper")]
pub struct Config {
    #[arg(long, env = "PORT", default_value_t = 10000)]
    pub port: u16,

    #[arg(long, env = "TARGET_URL", default_value = DEFAULT_TARGET_URL)]
    pub target_url: String,

    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 15)]
    pub fetch_timeout_secs: u64,

    #[arg(long, env = "PREVIEW_TIMEOUT_SECS", default_value_t = 10)]
    pub preview_timeout_secs: u64,

    /// JSON file overriding keywords, selectors and price patterns
    #[arg(long, env = "EXTRACTOR_CONFIG")]
    pub extractor_config: Option<PathBuf>,

    // Reserved for a notification sender, nothing reads them yet.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn preview_timeout(&self) -> Duration {
        Duration::from_secs(self.preview_timeout_secs)
    }

    pub fn notifications_configured(&self) -> bool {
        matches!(
            (&self.telegram_bot_token, &self.telegram_chat_id),
            (Some(token), Some(chat)) if !token.is_empty() && !chat.is_empty()
        )
    }

    pub fn load_extractor_config(&self) -> Result<ExtractorConfig, ConfigError> {
        match &self.extractor_config {
            Some(path) => ExtractorConfig::from_file(path),
            None => Ok(ExtractorConfig::default()),
        }
    }
}

/// Tunable extraction rules. Every field falls back to its default when absent
/// from the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub keywords: Vec<String>,
    pub candidate_selectors: Vec<String>,
    pub per_selector_limit: usize,
    pub fallback_scan_limit: usize,
    pub fallback_min_text_len: usize,
    pub fallback_markers: Vec<String>,
    pub evaluation_limit: usize,
    pub min_text_len: usize,
    pub strict_price_pattern: String,
    pub loose_price_pattern: String,
    pub min_price: u64,
    pub max_price: u64,
    pub title_len: usize,
    pub full_text_len: usize,
    pub probe_class_names: Vec<String>,
    pub probe_price_pattern: String,
    pub probe_price_samples: usize,
    pub probe_snippet_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let strings = |xs: &[&str]| xs.iter().map(ToString::to_string).collect::<Vec<_>>();
        ExtractorConfig {
            keywords: strings(&["black russia", "blackrussia", "блек раша", "блэк раша"]),
            candidate_selectors: strings(&[
                r#"div[class*="item"]"#,
                r#"div[class*="product"]"#,
                r#"div[class*="offer"]"#,
                r#"a[class*="item"]"#,
                r#"a[class*="product"]"#,
                "div.tc-item",
            ]),
            per_selector_limit: 10,
            fallback_scan_limit: 50,
            fallback_min_text_len: 20,
            fallback_markers: strings(&["руб", "₽", "цена"]),
            evaluation_limit: 20,
            min_text_len: 10,
            strict_price_pattern: r"(\d+)\s*(руб|₽|р\.)".to_string(),
            loose_price_pattern: r"\d{2,}".to_string(),
            min_price: 10,
            max_price: 50_000,
            title_len: 100,
            full_text_len: 200,
            probe_class_names: strings(&["tc-item", "item", "product", "offer", "listing", "card"]),
            probe_price_pattern: r"\d+\s*руб|\d+\s*₽".to_string(),
            probe_price_samples: 3,
            probe_snippet_len: 200,
        }
    }
}

impl ExtractorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: ExtractorConfig = serde_json::from_str(raw)?;
        config.keywords = config
            .keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            ExtractorConfig::from_json(r#"{"keywords": ["Black Russia", "BR"], "max_price": 900}"#)
                .unwrap();
        assert_eq!(config.keywords, vec!["black russia", "br"]);
        assert_eq!(config.max_price, 900);
        assert_eq!(config.min_price, 10);
        assert_eq!(config.candidate_selectors.len(), 6);
        assert_eq!(config.probe_snippet_len, 200);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            ExtractorConfig::from_json("{keywords"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn command_line_overrides() {
        let config = Config::parse_from(["funpay-hunter", "--port", "8080"]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(15));
        assert_eq!(config.preview_timeout(), Duration::from_secs(10));
    }
}
