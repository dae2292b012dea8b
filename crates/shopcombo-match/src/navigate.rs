//! Hand-off from a resolved line item to the host's product page.

use crate::error::MatchError;
use crate::resolve::ResolvedItem;

/// Opens the host's own product detail presentation for a product id.
pub trait ProductNavigator {
    /// # Errors
    ///
    /// Returns [`MatchError::Navigation`] if the host cannot open the product.
    fn navigate_to_product(&self, product_id: &str) -> Result<(), MatchError>;
}

/// Sends the user to the storefront product behind `item`.
///
/// # Errors
///
/// Returns [`MatchError::NotInShop`] when no storefront product was matched,
/// or whatever the navigator reports.
pub fn purchase_selection<N>(navigator: &N, item: &ResolvedItem) -> Result<(), MatchError>
where
    N: ProductNavigator + ?Sized,
{
    let Some(product_id) = item.product_id.as_deref() else {
        return Err(MatchError::NotInShop {
            name: item.name.clone(),
        });
    };
    tracing::info!(product_id, name = %item.name, "opening product");
    navigator.navigate_to_product(product_id)
}
