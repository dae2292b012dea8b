use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::alternative::AlternativeCombo;
use crate::category::Category;

/// A single recommended line item inside a [`ComboResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    /// Price the combo service allocated to this item. `NaN` when the
    /// service sent something unparsable; see the validity checks in the
    /// client crate.
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_included: Option<String>,
}

/// A generated product bundle in the shape the rest of the application uses.
///
/// Serialized field names match the records already written to storage by
/// earlier releases (`totalPrice`, `savingsPercentage`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboResult {
    pub items: Vec<Product>,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_price: f64,
    /// `100 - budget utilization`, or `0` when utilization was unreadable.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub savings_percentage: i64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_utilization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_combos: Option<Vec<AlternativeCombo>>,
}

impl ComboResult {
    /// Alternative combos, empty when the service sent none.
    #[must_use]
    pub fn alternatives(&self) -> &[AlternativeCombo] {
        self.alternative_combos.as_deref().unwrap_or_default()
    }

    /// Title to show for this combo.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.combo_name.as_deref().unwrap_or("Combo Details")
    }
}

/// Structural identity of a stored combo.
///
/// Two records are "the same combo" when category, budget and total price
/// all match. This is how save/unsave and the saved indicator decide
/// membership; it is not unique across distinct combos that share all three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboKey {
    pub category: Category,
    pub budget: f64,
    pub total_price: f64,
}

/// The most recently generated or opened combo, restored at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastCombo {
    pub combo: ComboResult,
    pub budget: f64,
    pub category: Category,
}

impl LastCombo {
    #[must_use]
    pub fn key(&self) -> ComboKey {
        ComboKey {
            category: self.category,
            budget: self.budget,
            total_price: self.combo.total_price,
        }
    }
}

/// A combo the shopper bookmarked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCombo {
    /// Opaque identifier. New records get a UUID; older records carry a
    /// composite `category-budget-total` string, which is still accepted.
    pub id: String,
    pub combo: ComboResult,
    pub budget: f64,
    pub category: Category,
    pub saved_at: DateTime<Utc>,
}

impl SavedCombo {
    /// Bookmarks `entry` with a fresh identifier.
    #[must_use]
    pub fn new(entry: LastCombo, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            combo: entry.combo,
            budget: entry.budget,
            category: entry.category,
            saved_at,
        }
    }

    #[must_use]
    pub fn key(&self) -> ComboKey {
        ComboKey {
            category: self.category,
            budget: self.budget,
            total_price: self.combo.total_price,
        }
    }

    #[must_use]
    pub fn to_last_combo(&self) -> LastCombo {
        LastCombo {
            combo: self.combo.clone(),
            budget: self.budget,
            category: self.category,
        }
    }
}

/// `serde_json` writes non-finite floats as `null`; read them back as `NaN`
/// so one bad number does not make a whole stored record unreadable.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}
