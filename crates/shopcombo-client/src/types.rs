//! Wire types for the combo-generation service.
//!
//! The service is loosely typed: prices arrive as decimal strings (sometimes
//! as bare numbers) and any field may be missing. Everything here is optional
//! so that a sloppy payload still deserializes; the normalizer decides what
//! the gaps mean.

use serde::Deserialize;

use crate::error::ComboError;

/// Top-level response envelope: `{"status": 1, "result": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawComboPayload {
    /// `1` is the only success value. Kept untyped so that a string or
    /// missing status is reported as an invalid status rather than a
    /// deserialization failure.
    #[serde(default)]
    pub status: serde_json::Value,
    #[serde(default)]
    pub result: Option<RawComboResult>,
}

impl RawComboPayload {
    /// Returns `true` when `status` is the number `1`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_f64() == Some(1.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComboResult {
    #[serde(default)]
    pub search_intent: Option<String>,
    #[serde(default)]
    pub total_budget: Option<RawDecimal>,
    #[serde(default)]
    pub combo_name: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<RawProduct>>,
    #[serde(default)]
    pub total_estimated_price: Option<RawDecimal>,
    /// Percentage string such as `"94%"`.
    #[serde(default)]
    pub budget_utilization: Option<String>,
    #[serde(default)]
    pub combo_description: Option<String>,
    #[serde(default)]
    pub use_cases: Option<Vec<String>>,
    #[serde(default)]
    pub alternative_combos: Option<Vec<RawAlternativeCombo>>,
    #[serde(default)]
    pub recommendations: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub allocated_price: Option<RawDecimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub why_included: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlternativeCombo {
    #[serde(default)]
    pub combo_name: Option<String>,
    /// `"Name ($price)"` strings.
    #[serde(default)]
    pub products: Option<Vec<String>>,
    #[serde(default)]
    pub total_price: Option<RawDecimal>,
}

/// A number the service may send either as a string or as a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDecimal {
    Text(String),
    Number(f64),
}

impl RawDecimal {
    /// Text form, as a JavaScript client would see it after coercion.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            RawDecimal::Text(s) => s.clone(),
            RawDecimal::Number(n) => n.to_string(),
        }
    }
}

/// One generation request: what the shopper wants and how much they can spend.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboRequest {
    search_term: String,
    budget: f64,
}

impl ComboRequest {
    /// Validates and builds a request.
    ///
    /// # Errors
    ///
    /// Returns [`ComboError::InvalidRequest`] when `search_term` is blank or
    /// `budget` is not a positive finite number.
    pub fn new(search_term: impl Into<String>, budget: f64) -> Result<Self, ComboError> {
        let search_term = search_term.into();
        if search_term.trim().is_empty() {
            return Err(ComboError::InvalidRequest(
                "search term must not be empty".to_owned(),
            ));
        }
        if !budget.is_finite() || budget <= 0.0 {
            return Err(ComboError::InvalidRequest(format!(
                "budget must be a positive number, got {budget}"
            )));
        }
        Ok(Self {
            search_term,
            budget,
        })
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Form fields in wire order. Whole budgets are sent without a decimal
    /// point (`250`, not `250.0`).
    #[must_use]
    pub fn form_fields(&self) -> [(&'static str, String); 2] {
        [
            ("search_term", self.search_term.clone()),
            ("budget", self.budget.to_string()),
        ]
    }
}
