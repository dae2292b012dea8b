//! Last-combo and saved-combo records on top of a [`KeyValueStore`].
//!
//! Reads never fail: a missing, unreadable or corrupt record is treated as
//! "nothing stored" and logged. Writes report their error so the caller can
//! decide whether to tell the shopper; none of them should abort the flow
//! that triggered them.

use chrono::Utc;
use serde_json::Value;
use shopcombo_core::{ComboKey, LastCombo, SavedCombo};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

pub const LAST_COMBO_KEY: &str = "last-combo";
pub const SAVED_COMBOS_KEY: &str = "saved-combos";

/// Whether a toggle added or removed the combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Saved,
    Unsaved,
}

pub struct ComboStore<S> {
    store: S,
}

impl<S: KeyValueStore> ComboStore<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// The combo to restore at start-up, if one was recorded and is readable.
    pub async fn load_last_combo(&self) -> Option<LastCombo> {
        let raw = self.read_key(LAST_COMBO_KEY).await?;
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(key = LAST_COMBO_KEY, error = %e, "ignoring corrupt last combo");
                None
            }
        }
    }

    /// Records `entry` as the combo to restore next time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be serialized or written.
    pub async fn save_last_combo(&self, entry: &LastCombo) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entry).map_err(|e| StoreError::Serialize {
            context: LAST_COMBO_KEY.to_owned(),
            source: e,
        })?;
        self.store.set_item(LAST_COMBO_KEY, &raw).await
    }

    /// All bookmarked combos in the order they were saved.
    ///
    /// An absent or corrupt list reads as empty. Individual entries that no
    /// longer parse are skipped so one bad record does not hide the rest.
    pub async fn load_saved_combos(&self) -> Vec<SavedCombo> {
        let entries = self.load_saved_entries().await;
        let total = entries.len();
        let saved: Vec<SavedCombo> = entries.iter().filter_map(parse_saved).collect();
        if saved.len() < total {
            tracing::warn!(
                skipped = total - saved.len(),
                "skipped unreadable saved combo entries"
            );
        }
        saved
    }

    /// `true` when a saved combo shares category, budget and total with `key`.
    pub async fn is_saved(&self, key: ComboKey) -> bool {
        self.load_saved_combos()
            .await
            .iter()
            .any(|saved| saved.key() == key)
    }

    /// Saves `candidate` if no saved combo matches it, otherwise removes every
    /// match. Returns the readable entries of the list as written.
    ///
    /// Entries that cannot be read are written back untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the updated list cannot be written.
    pub async fn toggle_saved_combo(
        &self,
        candidate: &LastCombo,
    ) -> Result<(ToggleOutcome, Vec<SavedCombo>), StoreError> {
        let mut entries = self.load_saved_entries().await;
        let key = candidate.key();
        let matches = |v: &Value| parse_saved(v).is_some_and(|s| s.key() == key);

        let outcome = if entries.iter().any(matches) {
            entries.retain(|v| !matches(v));
            ToggleOutcome::Unsaved
        } else {
            let added = SavedCombo::new(candidate.clone(), Utc::now());
            let value = serde_json::to_value(&added).map_err(|e| StoreError::Serialize {
                context: SAVED_COMBOS_KEY.to_owned(),
                source: e,
            })?;
            entries.push(value);
            ToggleOutcome::Saved
        };

        self.write_saved_entries(&entries).await?;
        tracing::info!(
            category = %candidate.category,
            budget = candidate.budget,
            outcome = ?outcome,
            saved = entries.len(),
            "toggled saved combo"
        );
        Ok((outcome, entries.iter().filter_map(parse_saved).collect()))
    }

    /// Removes the saved combo with identifier `id`. Returns the readable
    /// entries that remain.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the updated list cannot be written.
    pub async fn delete_saved_combo(&self, id: &str) -> Result<Vec<SavedCombo>, StoreError> {
        let mut entries = self.load_saved_entries().await;
        let before = entries.len();
        entries.retain(|v| v.get("id").and_then(Value::as_str) != Some(id));
        if entries.len() == before {
            tracing::debug!(id, "no saved combo with this id");
        } else {
            self.write_saved_entries(&entries).await?;
        }
        Ok(entries.iter().filter_map(parse_saved).collect())
    }

    /// Looks up a saved combo by `id` and records it as the last combo.
    ///
    /// A failure to record the last combo is logged and does not prevent the
    /// combo from being returned.
    pub async fn open_saved_combo(&self, id: &str) -> Option<LastCombo> {
        let entry = self
            .load_saved_combos()
            .await
            .into_iter()
            .find(|s| s.id == id)?
            .to_last_combo();

        if let Err(e) = self.save_last_combo(&entry).await {
            tracing::warn!(error = %e, "failed to record opened combo as last combo");
        }
        Some(entry)
    }

    /// Records `entry` as the last combo, logging instead of failing.
    pub async fn remember_last_combo(&self, entry: &LastCombo) {
        if let Err(e) = self.save_last_combo(entry).await {
            tracing::warn!(error = %e, "failed to record last combo");
        }
    }

    /// The stored list as raw JSON entries; absent or corrupt reads as empty.
    async fn load_saved_entries(&self) -> Vec<Value> {
        let Some(raw) = self.read_key(SAVED_COMBOS_KEY).await else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = SAVED_COMBOS_KEY, error = %e, "ignoring corrupt saved combos");
                Vec::new()
            }
        }
    }

    async fn write_saved_entries(&self, entries: &[Value]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries).map_err(|e| StoreError::Serialize {
            context: SAVED_COMBOS_KEY.to_owned(),
            source: e,
        })?;
        self.store.set_item(SAVED_COMBOS_KEY, &raw).await
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get_item(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, treating as empty");
                None
            }
        }
    }
}

fn parse_saved(value: &Value) -> Option<SavedCombo> {
    serde_json::from_value(value.clone()).ok()
}

#[cfg(test)]
#[path = "combos_test.rs"]
mod tests;
