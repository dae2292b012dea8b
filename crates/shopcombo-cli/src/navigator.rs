//! Product hand-off for a terminal: print the storefront link.

use std::collections::HashMap;

use shopcombo_match::{MatchError, ProductNavigator, ResolvedItem};

/// Opens products by printing their storefront URL.
///
/// Only products that came back from a search with a link can be opened.
pub(crate) struct LinkNavigator {
    links: HashMap<String, String>,
}

impl LinkNavigator {
    /// Collects links for `items`, making relative search URLs absolute
    /// against `origin`.
    pub(crate) fn new(origin: &str, items: &[ResolvedItem]) -> Self {
        let origin = origin.trim_end_matches('/');
        let links = items
            .iter()
            .filter_map(|item| {
                let id = item.product_id.clone()?;
                let url = item.url.as_deref()?;
                let absolute = if url.starts_with("http://") || url.starts_with("https://") {
                    url.to_owned()
                } else {
                    format!("{origin}/{}", url.trim_start_matches('/'))
                };
                Some((id, absolute))
            })
            .collect();
        Self { links }
    }
}

impl ProductNavigator for LinkNavigator {
    fn navigate_to_product(&self, product_id: &str) -> Result<(), MatchError> {
        let url = self
            .links
            .get(product_id)
            .ok_or_else(|| MatchError::Navigation {
                product_id: product_id.to_owned(),
                reason: "no storefront link for this product".to_owned(),
            })?;
        println!("{url}");
        Ok(())
    }
}
