//! Alternative combos as the service sends them: flat `"Name ($price)"`
//! strings rather than structured products.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{ComboResult, Product};
use crate::numeric::parse_decimal;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\$[\d.]+)\)").expect("valid price regex"));

static TRAILING_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\$[\d.]+\)\s*$").expect("valid trailing price regex"));

/// A cheaper or differently-themed bundle suggested next to the main combo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeCombo {
    pub combo_name: String,
    /// Each entry is `"Name ($price)"`; see [`parse_alternative_product`].
    pub products: Vec<String>,
    /// Decimal string exactly as the service sent it.
    pub total_price: String,
}

/// Name and optional price split out of an alternative-combo product string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeProduct {
    pub name: String,
    /// Price including its `$` sign, e.g. `"$150"`.
    pub price: Option<String>,
}

impl AlternativeProduct {
    /// Numeric price, or `0` when the string carried none.
    #[must_use]
    pub fn price_value(&self) -> f64 {
        self.price
            .as_deref()
            .map_or(0.0, |p| parse_decimal(&p.replace('$', "")))
    }
}

/// Splits `"Wireless Mouse ($29.99)"` into name and price.
///
/// The price is taken from the first `($digits)` group anywhere in the
/// string; the name only loses such a group when it sits at the very end.
/// Strings without a price keep their trimmed text as the name.
#[must_use]
pub fn parse_alternative_product(raw: &str) -> AlternativeProduct {
    match PRICE_RE.captures(raw).and_then(|c| c.get(1)) {
        Some(price) => AlternativeProduct {
            name: TRAILING_PRICE_RE.replace(raw, "").trim().to_owned(),
            price: Some(price.as_str().to_owned()),
        },
        None => AlternativeProduct {
            name: raw.trim().to_owned(),
            price: None,
        },
    }
}

impl AlternativeCombo {
    /// Parsed product entries, in order.
    #[must_use]
    pub fn parsed_products(&self) -> Vec<AlternativeProduct> {
        self.products
            .iter()
            .map(|p| parse_alternative_product(p))
            .collect()
    }

    /// Parsed total; `NaN` when unreadable.
    #[must_use]
    pub fn total_price_value(&self) -> f64 {
        parse_decimal(&self.total_price)
    }

    /// Expands this alternative into a full [`ComboResult`] so it can be
    /// opened in the detail view like a generated combo.
    #[must_use]
    pub fn to_combo_result(&self) -> ComboResult {
        let items = self
            .parsed_products()
            .into_iter()
            .map(|entry| Product {
                price: entry.price_value(),
                name: entry.name,
                description: String::new(),
                features: None,
                category: Some(String::new()),
                why_included: None,
            })
            .collect();

        ComboResult {
            items,
            total_price: self.total_price_value(),
            savings_percentage: 0,
            explanation: String::new(),
            combo_name: Some(self.combo_name.clone()),
            search_intent: None,
            budget_utilization: None,
            use_cases: None,
            recommendations: None,
            alternative_combos: None,
        }
    }
}
