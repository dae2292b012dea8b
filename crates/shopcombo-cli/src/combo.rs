//! Combo command handlers: generate, resume, and the detail views that
//! match line items against the storefront.

use anyhow::Context as _;
use clap::ValueEnum;
use futures::future::join_all;
use shopcombo_client::ComboSource;
use shopcombo_core::{BudgetTier, Category, ComboResult, LastCombo};
use shopcombo_match::{
    alternative_thumbnail, card_matches, purchase_selection, resolve_combo, resolve_line_item,
    ProductSearch, StorefrontSearch,
};
use shopcombo_store::KeyValueStore;

use crate::navigator::LinkNavigator;
use crate::render::{
    render_alternative_entry, render_budget_step, render_card_matches, render_categories,
    render_detail, render_result,
};
use crate::session::{parse_budget, ComboSession, StartScreen};

/// Budget preset selectable instead of a typed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Tight,
    Mid,
    Premium,
}

impl From<TierArg> for BudgetTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Tight => BudgetTier::Tight,
            TierArg::Mid => BudgetTier::Mid,
            TierArg::Premium => BudgetTier::Premium,
        }
    }
}

fn parse_category(raw: &str) -> anyhow::Result<Category> {
    raw.parse::<Category>()
        .with_context(|| "run `shopcombo categories` to list valid names".to_owned())
}

fn require_search(search: Option<&StorefrontSearch>) -> anyhow::Result<&StorefrontSearch> {
    search.context("product matching needs SHOPCOMBO_SHOP_URL to be set")
}

async fn current_combo<C, S>(session: &ComboSession<C, S>) -> anyhow::Result<LastCombo>
where
    C: ComboSource,
    S: KeyValueStore,
{
    session
        .store()
        .load_last_combo()
        .await
        .context("no combo yet; run `shopcombo generate` first")
}

/// Picks the combo a detail command works on: the last combo, or one of its
/// alternatives (1-based) expanded into a full combo.
fn select_combo(entry: &LastCombo, alternative: Option<usize>) -> anyhow::Result<ComboResult> {
    let Some(index) = alternative else {
        return Ok(entry.combo.clone());
    };
    let alternatives = entry.combo.alternatives();
    index
        .checked_sub(1)
        .and_then(|i| alternatives.get(i))
        .map(shopcombo_core::AlternativeCombo::to_combo_result)
        .with_context(|| {
            format!(
                "alternative {index} does not exist (this combo has {})",
                alternatives.len()
            )
        })
}

pub(crate) fn run_categories(category: Option<&str>) -> anyhow::Result<()> {
    match category {
        Some(raw) => println!("{}", render_budget_step(parse_category(raw)?)),
        None => println!("{}", render_categories()),
    }
    Ok(())
}

/// Shows the last combo, or the category picker when there is none.
pub(crate) async fn run_resume<C, S>(session: &ComboSession<C, S>) -> anyhow::Result<()>
where
    C: ComboSource,
    S: KeyValueStore,
{
    match session.start().await {
        StartScreen::Resume(entry) => {
            let saved = session.store().is_saved(entry.key()).await;
            println!("{}", render_result(&entry, saved));
        }
        StartScreen::ChooseCategory => {
            println!("Pick a category:\n{}", render_categories());
        }
    }
    Ok(())
}

/// Generates a combo and shows the result view.
///
/// On failure the budget step for the category is shown again and the error
/// is returned for the caller to report.
pub(crate) async fn run_generate<C, S>(
    session: &ComboSession<C, S>,
    category: &str,
    budget: Option<&str>,
    tier: Option<TierArg>,
    needs: &str,
) -> anyhow::Result<()>
where
    C: ComboSource,
    S: KeyValueStore,
{
    let category = parse_category(category)?;
    let budget = match (budget, tier) {
        (Some(raw), _) => parse_budget(raw)?,
        (None, Some(tier)) => category.budget_config().chip(tier.into()),
        (None, None) => anyhow::bail!("either --budget or --tier is required"),
    };

    match session.generate(category, budget, needs).await {
        Ok(entry) => {
            let saved = session.store().is_saved(entry.key()).await;
            println!("{}", render_result(&entry, saved));
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, %category, budget, "combo generation failed");
            println!("{}", render_budget_step(category));
            Err(e.into())
        }
    }
}

/// Detail view with storefront matches, plus alternative thumbnails.
pub(crate) async fn run_show<C, S>(
    session: &ComboSession<C, S>,
    search: Option<&StorefrontSearch>,
    alternative: Option<usize>,
) -> anyhow::Result<()>
where
    C: ComboSource,
    S: KeyValueStore,
{
    let entry = current_combo(session).await?;
    let combo = select_combo(&entry, alternative)?;

    let Some(search) = search else {
        println!("{}", render_detail(&combo, &[]));
        return Ok(());
    };

    let resolved = resolve_combo(search, &combo).await;
    println!("{}", render_detail(&combo, &resolved));

    for alt in combo.alternatives() {
        println!("\n{}", alt.combo_name);
        for line in alternative_lines(search, &alt.products).await {
            println!("{line}");
        }
    }
    Ok(())
}

async fn alternative_lines<P>(search: &P, entries: &[String]) -> Vec<String>
where
    P: ProductSearch + ?Sized,
{
    let lookups = entries.iter().map(|entry| async move {
        let thumbnail = match alternative_thumbnail(search, entry).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(entry = %entry, error = %e, "thumbnail search failed");
                None
            }
        };
        render_alternative_entry(entry, thumbnail.as_deref())
    });
    join_all(lookups).await
}

/// Price-range matches for each product card of the result view.
pub(crate) async fn run_match<C, S>(
    session: &ComboSession<C, S>,
    search: Option<&StorefrontSearch>,
) -> anyhow::Result<()>
where
    C: ComboSource,
    S: KeyValueStore,
{
    let search = require_search(search)?;
    let entry = current_combo(session).await?;

    let lookups = entry.combo.items.iter().map(|item| async move {
        let matches = card_matches(search, item).await.unwrap_or_else(|e| {
            tracing::warn!(name = %item.name, error = %e, "price-range search failed");
            Vec::new()
        });
        render_card_matches(&item.name, &matches)
    });
    for card in join_all(lookups).await {
        println!("{card}");
    }
    Ok(())
}

/// Opens the storefront product matched for item `item` (1-based).
pub(crate) async fn run_buy<C, S>(
    session: &ComboSession<C, S>,
    search: Option<&StorefrontSearch>,
    item: usize,
    alternative: Option<usize>,
) -> anyhow::Result<()>
where
    C: ComboSource,
    S: KeyValueStore,
{
    let search = require_search(search)?;
    let entry = current_combo(session).await?;
    let combo = select_combo(&entry, alternative)?;
    let product = item
        .checked_sub(1)
        .and_then(|i| combo.items.get(i))
        .with_context(|| format!("item {item} does not exist (this combo has {})", combo.items.len()))?;

    let resolved = resolve_line_item(search, product).await?;
    let navigator = LinkNavigator::new(search.origin().as_str(), std::slice::from_ref(&resolved));
    purchase_selection(&navigator, &resolved)?;
    Ok(())
}
