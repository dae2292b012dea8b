//! Persistence for the last generated combo and the shopper's saved combos.

pub mod combos;
pub mod error;
pub mod kv;

pub use combos::{ComboStore, ToggleOutcome, LAST_COMBO_KEY, SAVED_COMBOS_KEY};
pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
