use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const ENV_BASE_URL: &str = "SENTIMENT_API_URL";
const ENV_TIMEOUT_SECS: &str = "SENTIMENT_API_TIMEOUT_SECS";
const ENV_DISCARD_STALE: &str = "SENTIMENT_DISCARD_STALE";

/// Where the sentiment service lives and how submissions behave.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub base_url: String,
    /// No timeout unless set; a request may wait as long as the transport allows.
    pub request_timeout: Option<Duration>,
    /// When true, a response that belongs to a superseded submission is dropped
    /// instead of overwriting the displayed result.
    pub discard_stale_responses: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            discard_stale_responses: false,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Some(Duration::from_secs(secs)),
                _ => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        if let Some(raw) = lookup(ENV_DISCARD_STALE) {
            config.discard_stale_responses =
                matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_discard_stale_responses(mut self, discard: bool) -> Self {
        self.discard_stale_responses = discard;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
