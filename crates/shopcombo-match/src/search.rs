//! Product search port and its storefront-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use shopcombo_core::AppConfig;

use crate::candidate::SearchCandidate;
use crate::error::MatchError;
use crate::extract::is_available;
use crate::retry::retry_with_backoff;

/// Shopify caps predictive search at ten results per resource type.
const MAX_SUGGEST_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFilters {
    pub available: bool,
}

/// `{query, first, filters: {available}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub first: u32,
    pub filters: SearchFilters,
}

impl SearchRequest {
    /// Request for the first `first` products that are in stock.
    #[must_use]
    pub fn available(query: impl Into<String>, first: u32) -> Self {
        Self {
            query: query.into(),
            first,
            filters: SearchFilters { available: true },
        }
    }
}

/// Anything that can look products up by free text.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    /// Results in relevance order, at most `request.first` of them.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchCandidate>, MatchError>;
}

/// Searches a Shopify storefront through its public `search/suggest.json`
/// endpoint.
///
/// Transient errors (429, network failures, 5xx) are retried with
/// exponential backoff up to `max_retries` additional attempts.
pub struct StorefrontSearch {
    client: Client,
    origin: Url,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl StorefrontSearch {
    /// Creates a search client for the storefront at `shop_url`. Any path on
    /// the URL is ignored; requests go to the store root.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidShopUrl`] if `shop_url` has no usable
    /// origin, or [`MatchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        shop_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, MatchError> {
        let origin = store_origin(shop_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            origin,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from `config`, or `None` when no shop is configured.
    ///
    /// # Errors
    ///
    /// See [`StorefrontSearch::new`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, MatchError> {
        config
            .shop_url
            .as_deref()
            .map(|shop_url| {
                Self::new(
                    shop_url,
                    config.request_timeout_secs,
                    &config.user_agent,
                    config.search_max_retries,
                    config.search_backoff_base_secs,
                )
            })
            .transpose()
    }

    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    fn suggest_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.origin.clone();
        url.set_path("/search/suggest.json");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &request.query);
            pairs.append_pair("resources[type]", "product");
            pairs.append_pair(
                "resources[limit]",
                &request.first.clamp(1, MAX_SUGGEST_LIMIT).to_string(),
            );
            if request.filters.available {
                pairs.append_pair("resources[options][unavailable_products]", "hide");
            }
        }
        url
    }

    async fn fetch_once(&self, url: &Url) -> Result<serde_json::Value, MatchError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(0);
            return Err(MatchError::RateLimited {
                domain: url.host_str().unwrap_or_default().to_owned(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(MatchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| MatchError::Deserialize {
            context: format!("product search for {url}"),
            source: e,
        })
    }
}

#[async_trait]
impl ProductSearch for StorefrontSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchCandidate>, MatchError> {
        let url = self.suggest_url(request);
        let body = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.fetch_once(&url)
        })
        .await?;

        let products = body
            .pointer("/resources/results/products")
            .and_then(serde_json::Value::as_array)
            .cloned()
            .unwrap_or_default();

        let limit = usize::try_from(request.first).unwrap_or(usize::MAX);
        let candidates: Vec<SearchCandidate> = products
            .into_iter()
            .filter(|p| !request.filters.available || is_available(p))
            .take(limit)
            .map(SearchCandidate::from_value)
            .collect();

        tracing::debug!(
            query = %request.query,
            results = candidates.len(),
            "product search complete"
        );
        Ok(candidates)
    }
}

/// Scheme and host of `shop_url`. A bare host gets `https://`.
fn store_origin(shop_url: &str) -> Result<Url, MatchError> {
    let trimmed = shop_url.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&with_scheme).map_err(|e| MatchError::InvalidShopUrl {
        shop_url: shop_url.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(MatchError::InvalidShopUrl {
            shop_url: shop_url.to_owned(),
            reason: "expected an http(s) URL with a host".to_owned(),
        });
    }

    Url::parse(&parsed.origin().ascii_serialization()).map_err(|e| MatchError::InvalidShopUrl {
        shop_url: shop_url.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_search(shop_url: &str) -> StorefrontSearch {
        StorefrontSearch::new(shop_url, 5, "shopcombo-test/0.1", 0, 0)
            .expect("search client should build")
    }

    #[test]
    fn origin_drops_path_and_adds_scheme() {
        assert_eq!(
            test_search("https://shop.example.com/collections/all").origin().as_str(),
            "https://shop.example.com/"
        );
        assert_eq!(
            test_search("shop.example.com").origin().as_str(),
            "https://shop.example.com/"
        );
    }

    #[test]
    fn invalid_shop_url_is_rejected() {
        let result = StorefrontSearch::new("ftp://files.example.com", 5, "ua", 0, 0);
        assert!(matches!(result, Err(MatchError::InvalidShopUrl { .. })));
    }

    #[test]
    fn suggest_url_encodes_query_and_limits() {
        let search = test_search("https://shop.example.com");
        let url = search.suggest_url(&SearchRequest::available("watch strap", 25));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(url.path(), "/search/suggest.json");
        assert!(pairs.contains(&("q".to_owned(), "watch strap".to_owned())));
        assert!(pairs.contains(&("resources[limit]".to_owned(), "10".to_owned())));
        assert!(pairs.contains(&(
            "resources[options][unavailable_products]".to_owned(),
            "hide".to_owned()
        )));
    }

    #[test]
    fn search_request_serializes_like_host_search() {
        let json = serde_json::to_value(SearchRequest::available("tote bag", 5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"query": "tote bag", "first": 5, "filters": {"available": true}})
        );
    }
}
