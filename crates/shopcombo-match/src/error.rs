use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid shop URL \"{shop_url}\": {reason}")]
    InvalidShopUrl { shop_url: String, reason: String },

    #[error("product \"{name}\" was not found in the shop")]
    NotInShop { name: String },

    #[error("could not open product {product_id}: {reason}")]
    Navigation { product_id: String, reason: String },
}
