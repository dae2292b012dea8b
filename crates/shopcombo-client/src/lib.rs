//! Combo-generation service client: request, normalize, validate, retry.

pub mod client;
pub mod error;
pub mod normalize;
pub mod retry;
pub mod types;
pub mod validity;

pub use client::ComboClient;
pub use error::{ComboError, Invalidity};
pub use normalize::normalize;
pub use retry::{acquire_combo, ComboSource, MAX_GENERATION_ATTEMPTS};
pub use types::{
    ComboRequest, RawAlternativeCombo, RawComboPayload, RawComboResult, RawDecimal, RawProduct,
};
pub use validity::{find_invalidity, is_invalid};
