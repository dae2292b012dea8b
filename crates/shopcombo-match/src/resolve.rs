//! Line-item resolution: from a recommended product to a sellable one.

use futures::future::join_all;
use shopcombo_core::{parse_alternative_product, ComboResult, Product};

use crate::candidate::{in_band_matches, select_best_match, PriceBand, SearchCandidate};
use crate::error::MatchError;
use crate::query::select_query;
use crate::search::{ProductSearch, SearchRequest};

/// Results fetched per line item in the detail view.
pub const LINE_ITEM_RESULTS: u32 = 5;
/// Results fetched for a product card in the result view.
pub const CARD_RESULTS: u32 = 10;
/// In-band matches listed under a product card.
pub const CARD_MATCH_LIMIT: usize = 2;

/// A combo line item paired with the storefront product chosen for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    /// Name as recommended by the combo service.
    pub name: String,
    pub allocated_price: f64,
    pub query: String,
    /// `None` when the search returned nothing usable; such items cannot be bought.
    pub product_id: Option<String>,
    /// Matched product title, or the recommended name.
    pub title: String,
    /// Matched product price, or the allocated price.
    pub display_price: f64,
    pub image: Option<String>,
    pub url: Option<String>,
    pub in_band: bool,
}

impl ResolvedItem {
    fn unmatched(item: &Product, query: String) -> Self {
        Self {
            name: item.name.clone(),
            allocated_price: item.price,
            query,
            product_id: None,
            title: item.name.clone(),
            display_price: item.price,
            image: None,
            url: None,
            in_band: false,
        }
    }

    fn matched(item: &Product, query: String, candidate: &SearchCandidate) -> Self {
        Self {
            name: item.name.clone(),
            allocated_price: item.price,
            query,
            product_id: candidate.id.clone(),
            title: candidate
                .title
                .clone()
                .unwrap_or_else(|| item.name.clone()),
            display_price: candidate.price.unwrap_or(item.price),
            image: candidate.image.clone(),
            url: candidate.url.clone(),
            in_band: PriceBand::around(item.price).admits(candidate),
        }
    }

    #[must_use]
    pub fn is_in_shop(&self) -> bool {
        self.product_id.is_some()
    }
}

fn query_for(item: &Product) -> String {
    select_query(&item.name, item.category.as_deref().unwrap_or_default())
}

/// Searches for `item` and picks the best candidate.
///
/// # Errors
///
/// Returns the search backend's error.
pub async fn resolve_line_item<S>(search: &S, item: &Product) -> Result<ResolvedItem, MatchError>
where
    S: ProductSearch + ?Sized,
{
    let query = query_for(item);
    let candidates = search
        .search(&SearchRequest::available(query.clone(), LINE_ITEM_RESULTS))
        .await?;

    let resolved = match select_best_match(&candidates, item.price) {
        Some(best) => ResolvedItem::matched(item, query, best),
        None => ResolvedItem::unmatched(item, query),
    };
    tracing::debug!(
        name = %resolved.name,
        query = %resolved.query,
        product_id = resolved.product_id.as_deref().unwrap_or("-"),
        in_band = resolved.in_band,
        "resolved line item"
    );
    Ok(resolved)
}

/// Resolves every item of `combo` concurrently, in item order.
///
/// A failed search leaves that item unmatched rather than failing the combo.
pub async fn resolve_combo<S>(search: &S, combo: &ComboResult) -> Vec<ResolvedItem>
where
    S: ProductSearch + ?Sized,
{
    let lookups = combo.items.iter().map(|item| async move {
        match resolve_line_item(search, item).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(name = %item.name, error = %e, "product search failed");
                ResolvedItem::unmatched(item, query_for(item))
            }
        }
    });
    join_all(lookups).await
}

/// In-band storefront products for a product card, at most [`CARD_MATCH_LIMIT`].
///
/// # Errors
///
/// Returns the search backend's error.
pub async fn card_matches<S>(search: &S, item: &Product) -> Result<Vec<SearchCandidate>, MatchError>
where
    S: ProductSearch + ?Sized,
{
    let candidates = search
        .search(&SearchRequest::available(query_for(item), CARD_RESULTS))
        .await?;
    Ok(in_band_matches(&candidates, item.price, CARD_MATCH_LIMIT)
        .into_iter()
        .cloned()
        .collect())
}

/// Thumbnail for an alternative-combo entry such as `"Desk Lamp ($45)"`:
/// the image of the top search hit for its name.
///
/// # Errors
///
/// Returns the search backend's error.
pub async fn alternative_thumbnail<S>(search: &S, entry: &str) -> Result<Option<String>, MatchError>
where
    S: ProductSearch + ?Sized,
{
    let parsed = parse_alternative_product(entry);
    let query = select_query(&parsed.name, "");
    let candidates = search.search(&SearchRequest::available(query, 1)).await?;
    Ok(candidates.into_iter().next().and_then(|c| c.image))
}
