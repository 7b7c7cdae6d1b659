#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("HTTP status {0}")]
    Status(u16),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout_secs)
        } else if err.is_connect() {
            FetchError::Connect(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Reasons an extraction pass came back empty. Logged, never returned to callers.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseDegradation {
    #[error("No candidate blocks found")]
    NoCandidates,
    #[error("{0} candidate blocks evaluated, none matched")]
    NoItems(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Cannot read extractor config")]
    Io(#[from] std::io::Error),
    #[error("Malformed extractor config")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum HunterError {
    #[error("Configuration error")]
    Config(#[from] ConfigError),
    #[error("HTTP client error")]
    Fetch(#[from] FetchError),
    #[error("Server error")]
    Server(#[from] std::io::Error),
}
