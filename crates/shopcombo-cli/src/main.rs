mod combo;
mod navigator;
mod render;
mod saved;
mod session;

use clap::{Parser, Subcommand};
use shopcombo_client::ComboClient;
use shopcombo_match::StorefrontSearch;
use shopcombo_store::{ComboStore, FileStore};
use tracing_subscriber::EnvFilter;

use crate::combo::TierArg;
use crate::saved::SavedCommands;
use crate::session::ComboSession;

#[derive(Debug, Parser)]
#[command(name = "shopcombo")]
#[command(about = "Generate product combos that fit a shopping budget")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List categories with their budget presets
    Categories {
        /// Show presets and prompt ideas for one category
        #[arg(long)]
        category: Option<String>,
    },
    /// Generate a combo for a category and budget
    Generate {
        /// Category name, e.g. "Electronics" or "Food & drinks"
        #[arg(long)]
        category: String,
        /// Budget amount in dollars
        #[arg(long, conflicts_with = "tier", required_unless_present = "tier")]
        budget: Option<String>,
        /// Use the category's preset budget instead of an amount
        #[arg(long, value_enum)]
        tier: Option<TierArg>,
        /// What you are looking for, in your own words
        #[arg(long, default_value = "")]
        needs: String,
    },
    /// Show the last combo, or the category list if there is none
    Resume,
    /// Show the last combo with matching storefront products
    Show {
        /// Show this alternative (1-based) instead of the main combo
        #[arg(long)]
        alternative: Option<usize>,
    },
    /// Show an alternative combo (1-based) with matching storefront products
    Alternative { index: usize },
    /// List in-budget storefront products for each item of the last combo
    Match,
    /// Open the storefront product for an item (1-based) of the last combo
    Buy {
        item: usize,
        /// Buy from this alternative (1-based) instead of the main combo
        #[arg(long)]
        alternative: Option<usize>,
    },
    /// Manage saved combos
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = shopcombo_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(!config.is_production())
        .init();
    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();

    let store = ComboStore::new(FileStore::new(config.data_dir.clone()));
    let session = ComboSession::new(ComboClient::from_config(&config)?, store);
    let search = StorefrontSearch::from_config(&config)?;

    match cli.command {
        Some(Commands::Categories { category }) => combo::run_categories(category.as_deref()),
        Some(Commands::Generate {
            category,
            budget,
            tier,
            needs,
        }) => combo::run_generate(&session, &category, budget.as_deref(), tier, &needs).await,
        Some(Commands::Resume) | None => combo::run_resume(&session).await,
        Some(Commands::Show { alternative }) => {
            combo::run_show(&session, search.as_ref(), alternative).await
        }
        Some(Commands::Alternative { index }) => {
            combo::run_show(&session, search.as_ref(), Some(index)).await
        }
        Some(Commands::Match) => combo::run_match(&session, search.as_ref()).await,
        Some(Commands::Buy { item, alternative }) => {
            combo::run_buy(&session, search.as_ref(), item, alternative).await
        }
        Some(Commands::Saved { command }) => saved::run_saved(session.store(), command).await,
    }
}
