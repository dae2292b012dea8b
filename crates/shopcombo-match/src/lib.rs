//! Storefront product matching for combo line items.

pub mod candidate;
pub mod error;
pub mod extract;
pub mod navigate;
pub mod query;
pub mod resolve;
pub(crate) mod retry;
pub mod search;

pub use candidate::{in_band_matches, select_best_match, PriceBand, SearchCandidate};
pub use error::MatchError;
pub use navigate::{purchase_selection, ProductNavigator};
pub use query::select_query;
pub use resolve::{
    alternative_thumbnail, card_matches, resolve_combo, resolve_line_item, ResolvedItem,
};
pub use search::{ProductSearch, SearchFilters, SearchRequest, StorefrontSearch};
