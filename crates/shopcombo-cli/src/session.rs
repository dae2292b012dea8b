//! One shopper's pass through the generate flow.
//!
//! The session owns the busy flag that keeps a second generation from
//! starting while one is in flight, and records every accepted combo as the
//! last combo so the next start can resume it.

use std::sync::atomic::{AtomicBool, Ordering};

use shopcombo_client::{acquire_combo, ComboError, ComboRequest, ComboSource};
use shopcombo_core::{build_search_term, Category, LastCombo};
use shopcombo_store::{ComboStore, KeyValueStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a combo is already being generated")]
    Busy,

    #[error("please enter a valid budget (got \"{0}\")")]
    InvalidBudget(String),

    #[error(transparent)]
    Combo(#[from] ComboError),
}

/// Where the flow begins.
#[derive(Debug, Clone, PartialEq)]
pub enum StartScreen {
    /// A combo from an earlier run is on record.
    Resume(LastCombo),
    ChooseCategory,
}

/// Parses a typed budget such as `"250"`, `"$1,000"` or `"99.50"`.
///
/// Dollar signs, thousands separators and spaces are dropped; what is left
/// must be a plain positive decimal. Any other character rejects the input
/// rather than shortening the amount.
///
/// # Errors
///
/// Returns [`SessionError::InvalidBudget`] for anything else.
pub fn parse_budget(raw: &str) -> Result<f64, SessionError> {
    let invalid = || SessionError::InvalidBudget(raw.to_owned());
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }

    let value: f64 = cleaned.parse().map_err(|_| invalid())?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Clears the busy flag when a generation finishes, however it finishes.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ComboSession<C, S> {
    source: C,
    store: ComboStore<S>,
    busy: AtomicBool,
}

impl<C, S> ComboSession<C, S>
where
    C: ComboSource,
    S: KeyValueStore,
{
    pub fn new(source: C, store: ComboStore<S>) -> Self {
        Self {
            source,
            store,
            busy: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &ComboStore<S> {
        &self.store
    }

    /// Resumes the last combo if one is stored.
    pub async fn start(&self) -> StartScreen {
        match self.store.load_last_combo().await {
            Some(entry) => StartScreen::Resume(entry),
            None => StartScreen::ChooseCategory,
        }
    }

    /// Generates a combo for `category` within `budget`.
    ///
    /// The accepted combo is recorded as the last combo; a failure to record
    /// it is logged and the combo is still returned.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Busy`] if another generation is running.
    /// - [`SessionError::InvalidBudget`] for a non-positive or non-finite budget.
    /// - [`SessionError::Combo`] for service failures and exhausted retries.
    pub async fn generate(
        &self,
        category: Category,
        budget: f64,
        needs: &str,
    ) -> Result<LastCombo, SessionError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        if !budget.is_finite() || budget <= 0.0 {
            return Err(SessionError::InvalidBudget(budget.to_string()));
        }

        let search_term = build_search_term(category, needs);
        tracing::info!(%category, budget, search_term = %search_term, "generating combo");
        let request = ComboRequest::new(search_term, budget)?;
        let combo = acquire_combo(&self.source, &request).await?;

        let entry = LastCombo {
            combo,
            budget,
            category,
        };
        self.store.remember_last_combo(&entry).await;
        Ok(entry)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
