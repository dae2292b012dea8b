use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
