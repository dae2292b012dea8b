use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComboError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("combo service returned status {status}, expected 1")]
    InvalidStatus { status: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("combo service reported success but sent no result")]
    MissingResult,

    #[error("invalid combo request: {0}")]
    InvalidRequest(String),

    #[error("combo generation failed after {attempts} attempts: {cause}")]
    Generation { attempts: u32, cause: Invalidity },
}

/// Why a normalized combo was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Invalidity {
    #[error("total price is not a finite number ({value})")]
    TotalPrice { value: f64 },

    #[error("price of item {index} ({name}) is not a finite number ({value})")]
    ItemPrice {
        index: usize,
        name: String,
        value: f64,
    },

    #[error("total \"{raw}\" of alternative combo {index} is not a finite number")]
    AlternativeTotal { index: usize, raw: String },

    #[error("no generation attempt was made")]
    NoAttempts,
}
