//! Shared model, configuration and parsing helpers for shopcombo.

pub mod alternative;
pub mod app_config;
pub mod category;
pub mod config;
pub mod error;
pub mod models;
pub mod numeric;

pub use alternative::{parse_alternative_product, AlternativeCombo, AlternativeProduct};
pub use app_config::{AppConfig, Environment};
pub use category::{
    build_search_term, BudgetChip, BudgetTier, Category, CategoryBudgetConfig, ALL_CATEGORIES,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use models::{ComboKey, ComboResult, LastCombo, Product, SavedCombo};
pub use numeric::{is_usable_number, parse_decimal, parse_int_prefix};
