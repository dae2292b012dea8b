use std::path::PathBuf;

/// Default combo-generation endpoint.
pub const DEFAULT_SERVICE_URL: &str =
    "https://shorts.multiplewords.com/mwvideos/api/product_combo_generator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub data_dir: PathBuf,
    /// Storefront used for product search. Matching is skipped when unset.
    pub shop_url: Option<String>,
    pub search_max_retries: u32,
    pub search_backoff_base_secs: u64,
}

impl AppConfig {
    /// Production runs log without module targets.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.env == Environment::Production
    }

    /// Service URL without its query string, for logs.
    #[must_use]
    pub fn service_url_for_display(&self) -> &str {
        self.service_url
            .split_once('?')
            .map_or(self.service_url.as_str(), |(base, _)| base)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("service_url", &self.service_url_for_display())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("data_dir", &self.data_dir)
            .field("shop_url", &self.shop_url)
            .field("search_max_retries", &self.search_max_retries)
            .field("search_backoff_base_secs", &self.search_backoff_base_secs)
            .finish()
    }
}
