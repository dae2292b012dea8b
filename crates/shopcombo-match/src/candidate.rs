use serde_json::Value;

use crate::extract::{product_id, product_image, product_price, product_title, product_url};

/// A storefront search hit with the fields matching needs pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub url: Option<String>,
    /// The record as the search backend returned it.
    pub raw: Value,
}

impl SearchCandidate {
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        Self {
            id: product_id(&raw),
            title: product_title(&raw),
            price: product_price(&raw),
            image: product_image(&raw),
            url: product_url(&raw),
            raw,
        }
    }
}

/// Accepted price window around an allocated price: 60% to 140%, inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
}

impl PriceBand {
    #[must_use]
    pub fn around(allocated_price: f64) -> Self {
        Self {
            min: allocated_price * 0.6,
            max: allocated_price * 1.4,
        }
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// `true` when the candidate has a price and it is inside the band.
    #[must_use]
    pub fn admits(&self, candidate: &SearchCandidate) -> bool {
        candidate.price.is_some_and(|p| self.contains(p))
    }
}

/// Picks the candidate to show for a line item.
///
/// First in-band candidate, else the first with an image, else the first
/// candidate at all. `None` only when `candidates` is empty.
#[must_use]
pub fn select_best_match(
    candidates: &[SearchCandidate],
    allocated_price: f64,
) -> Option<&SearchCandidate> {
    let band = PriceBand::around(allocated_price);
    candidates
        .iter()
        .find(|c| band.admits(c))
        .or_else(|| candidates.iter().find(|c| c.image.is_some()))
        .or_else(|| candidates.first())
}

/// Up to `limit` in-band candidates, in search order.
#[must_use]
pub fn in_band_matches(
    candidates: &[SearchCandidate],
    allocated_price: f64,
    limit: usize,
) -> Vec<&SearchCandidate> {
    let band = PriceBand::around(allocated_price);
    candidates
        .iter()
        .filter(|c| band.admits(c))
        .take(limit)
        .collect()
}
