//! Saved-combo command handlers.

use clap::Subcommand;
use shopcombo_core::LastCombo;
use shopcombo_store::{ComboStore, KeyValueStore, ToggleOutcome};

use crate::render::{render_result, render_saved_list};

/// Sub-commands available under `saved`.
#[derive(Debug, Subcommand)]
pub enum SavedCommands {
    /// List saved combos, oldest first
    List,
    /// Save the last combo, or unsave it if it is already saved
    Toggle,
    /// Open a saved combo and make it the last combo
    Open {
        /// Saved combo id, as shown by `saved list`
        id: String,
    },
    /// Delete a saved combo
    Delete {
        /// Saved combo id, as shown by `saved list`
        id: String,
    },
}

pub(crate) async fn run_saved<S: KeyValueStore>(
    store: &ComboStore<S>,
    command: SavedCommands,
) -> anyhow::Result<()> {
    match command {
        SavedCommands::List => {
            println!("{}", render_saved_list(&store.load_saved_combos().await));
        }
        SavedCommands::Toggle => {
            let Some(entry) = store.load_last_combo().await else {
                anyhow::bail!("no combo to save; run `shopcombo generate` first");
            };
            let (outcome, saved) = store.toggle_saved_combo(&entry).await?;
            println!("{}", toggle_message(outcome, &entry, saved.len()));
        }
        SavedCommands::Open { id } => {
            let Some(entry) = store.open_saved_combo(&id).await else {
                anyhow::bail!("no saved combo with id {id}");
            };
            println!("{}", render_result(&entry, true));
        }
        SavedCommands::Delete { id } => {
            let remaining = store.delete_saved_combo(&id).await?;
            println!("{}", render_saved_list(&remaining));
        }
    }
    Ok(())
}

fn toggle_message(outcome: ToggleOutcome, entry: &LastCombo, count: usize) -> String {
    let verb = match outcome {
        ToggleOutcome::Saved => "Saved",
        ToggleOutcome::Unsaved => "Removed",
    };
    format!(
        "{verb} \"{}\" ({count} saved combo{})",
        entry.combo.display_name(),
        if count == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use shopcombo_core::{Category, ComboResult};

    use super::*;

    fn entry() -> LastCombo {
        LastCombo {
            combo: ComboResult {
                items: Vec::new(),
                total_price: 80.0,
                savings_percentage: 20,
                explanation: String::new(),
                combo_name: None,
                search_intent: None,
                budget_utilization: None,
                use_cases: None,
                recommendations: None,
                alternative_combos: None,
            },
            budget: 100.0,
            category: Category::Men,
        }
    }

    #[test]
    fn toggle_message_pluralizes() {
        assert_eq!(
            toggle_message(ToggleOutcome::Saved, &entry(), 1),
            "Saved \"Combo Details\" (1 saved combo)"
        );
        assert_eq!(
            toggle_message(ToggleOutcome::Unsaved, &entry(), 0),
            "Removed \"Combo Details\" (0 saved combos)"
        );
    }
}
