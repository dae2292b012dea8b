//! Turns the service's loosely typed payload into a [`ComboResult`].
//!
//! This is the only place that reads string-encoded numbers. Unparsable
//! prices become `NaN` rather than errors; the validity checker decides what
//! to do about them. An unreadable budget utilization only costs the savings
//! figure, which falls back to `0`.

use shopcombo_core::{parse_decimal, parse_int_prefix, AlternativeCombo, ComboResult, Product};

use crate::types::{RawAlternativeCombo, RawComboPayload, RawDecimal, RawProduct};

/// Maps a raw payload onto the internal model. Pure and infallible.
///
/// [`crate::ComboClient`] never hands over a payload without a `result`;
/// should one get here anyway, it normalizes to an empty combo whose total
/// is `NaN` and fails the validity check.
#[must_use]
pub fn normalize(payload: RawComboPayload) -> ComboResult {
    let result = payload.result.unwrap_or_default();

    ComboResult {
        items: result
            .products
            .unwrap_or_default()
            .into_iter()
            .map(normalize_product)
            .collect(),
        total_price: parse_price(result.total_estimated_price.as_ref()),
        savings_percentage: savings_percentage(result.budget_utilization.as_deref()),
        explanation: result.combo_description.unwrap_or_default(),
        combo_name: result.combo_name,
        search_intent: result.search_intent,
        budget_utilization: result.budget_utilization,
        use_cases: result.use_cases,
        recommendations: result.recommendations,
        alternative_combos: result
            .alternative_combos
            .map(|alts| alts.into_iter().map(normalize_alternative).collect()),
    }
}

fn normalize_product(raw: RawProduct) -> Product {
    Product {
        name: raw.product_name.unwrap_or_default(),
        price: parse_price(raw.allocated_price.as_ref()),
        description: raw.description.unwrap_or_default(),
        features: raw.features,
        category: raw.category,
        why_included: raw.why_included,
    }
}

fn normalize_alternative(raw: RawAlternativeCombo) -> AlternativeCombo {
    AlternativeCombo {
        combo_name: raw.combo_name.unwrap_or_default(),
        products: raw.products.unwrap_or_default(),
        total_price: raw
            .total_price
            .as_ref()
            .map(RawDecimal::as_text)
            .unwrap_or_default(),
    }
}

fn parse_price(raw: Option<&RawDecimal>) -> f64 {
    match raw {
        Some(RawDecimal::Number(n)) => *n,
        Some(RawDecimal::Text(s)) => parse_decimal(s),
        None => f64::NAN,
    }
}

/// `100 - utilization`, where `"94%"` reads as `94`. Unreadable or out of
/// range → `0`.
fn savings_percentage(budget_utilization: Option<&str>) -> i64 {
    budget_utilization
        .and_then(|raw| parse_int_prefix(&raw.replacen('%', "", 1)))
        .and_then(|used| 100i64.checked_sub(used))
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
