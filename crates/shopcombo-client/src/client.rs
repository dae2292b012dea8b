//! HTTP client for the combo-generation service.
//!
//! One `generate` call is one POST. Retries for corrupt numbers live in
//! [`crate::retry`]; transport failures and bad status values are returned
//! to the caller as-is.

use std::time::Duration;

use reqwest::Client;
use shopcombo_core::AppConfig;

use crate::error::ComboError;
use crate::types::{ComboRequest, RawComboPayload};

pub struct ComboClient {
    client: Client,
    endpoint: String,
}

impl ComboClient {
    /// Creates a client that posts to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ComboError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ComboError::InvalidRequest`] if
    /// `endpoint` is not a valid URL.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ComboError> {
        reqwest::Url::parse(endpoint).map_err(|e| {
            ComboError::InvalidRequest(format!("invalid service URL '{endpoint}': {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Creates a client from the service URL, timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// See [`ComboClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ComboError> {
        Self::new(
            &config.service_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `request` as a form and returns the parsed envelope.
    ///
    /// # Errors
    ///
    /// - [`ComboError::Http`] on network failure.
    /// - [`ComboError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ComboError::Deserialize`] if the body is not the expected JSON shape.
    /// - [`ComboError::InvalidStatus`] if the envelope's `status` is not `1`.
    /// - [`ComboError::MissingResult`] if a successful envelope has no `result`.
    pub async fn generate(&self, request: &ComboRequest) -> Result<RawComboPayload, ComboError> {
        tracing::info!(
            search_term = request.search_term(),
            budget = request.budget(),
            "requesting combo"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .form(&request.form_fields())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "combo service returned error status");
            return Err(ComboError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text().await?;
        let payload: RawComboPayload =
            serde_json::from_str(&body).map_err(|e| ComboError::Deserialize {
                context: format!("combo response for \"{}\"", request.search_term()),
                source: e,
            })?;

        tracing::debug!(
            status = %payload.status,
            products = payload
                .result
                .as_ref()
                .and_then(|r| r.products.as_ref())
                .map_or(0, Vec::len),
            "combo response received"
        );

        if !payload.is_success() {
            return Err(ComboError::InvalidStatus {
                status: payload.status.to_string(),
            });
        }
        if payload.result.is_none() {
            return Err(ComboError::MissingResult);
        }

        Ok(payload)
    }
}
