//! Plain-text views of categories, combos and saved combos.

use shopcombo_core::{
    parse_alternative_product, BudgetTier, ComboResult, LastCombo, SavedCombo, ALL_CATEGORIES,
};
use shopcombo_match::{ResolvedItem, SearchCandidate};

pub(crate) fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// Category picker with each category's budget presets.
pub(crate) fn render_categories() -> String {
    let mut lines = Vec::with_capacity(ALL_CATEGORIES.len());
    for category in ALL_CATEGORIES {
        let config = category.budget_config();
        let chips: Vec<String> = config
            .budget_chips
            .iter()
            .map(|chip| format!("{} {}", chip.tier.label(), format_price(chip.value)))
            .collect();
        lines.push(format!("{:<20} {}", category.name(), chips.join(" | ")));
    }
    lines.join("\n")
}

/// Budget step for one category: presets, placeholder and prompt ideas.
pub(crate) fn render_budget_step(category: shopcombo_core::Category) -> String {
    let config = category.budget_config();
    let mut lines = vec![format!("{category}")];
    for tier in [BudgetTier::Tight, BudgetTier::Mid, BudgetTier::Premium] {
        lines.push(format!("  {:<10} {}", tier.label(), format_price(config.chip(tier))));
    }
    lines.push(format!("  needs: {}", config.input_placeholder));
    for prompt in config.suggested_prompts {
        lines.push(format!("    - {prompt}"));
    }
    lines.join("\n")
}

fn combo_header(combo: &ComboResult) -> Vec<String> {
    let mut lines = vec![combo.display_name().to_owned()];
    lines.push(format!(
        "Total {}  (save {}%)",
        format_price(combo.total_price),
        combo.savings_percentage
    ));
    if !combo.explanation.is_empty() {
        lines.push(combo.explanation.clone());
    }
    lines
}

/// Result view: the combo, its items and its alternatives.
pub(crate) fn render_result(entry: &LastCombo, saved: bool) -> String {
    let combo = &entry.combo;
    let mut lines = combo_header(combo);
    lines.push(format!(
        "{} | budget {}{}",
        entry.category,
        format_price(entry.budget),
        if saved { " | saved" } else { "" }
    ));
    lines.push(String::new());

    for (index, item) in combo.items.iter().enumerate() {
        lines.push(format!(
            "{:>2}. {} {}",
            index + 1,
            item.name,
            format_price(item.price)
        ));
        if let Some(why) = item.why_included.as_deref().filter(|w| !w.is_empty()) {
            lines.push(format!("    {why}"));
        }
    }

    if let Some(use_cases) = combo.use_cases.as_deref().filter(|u| !u.is_empty()) {
        lines.push(String::new());
        lines.push(format!("Good for: {}", use_cases.join(", ")));
    }

    let alternatives = combo.alternatives();
    if !alternatives.is_empty() {
        lines.push(String::new());
        lines.push("Alternatives:".to_owned());
        for (index, alt) in alternatives.iter().enumerate() {
            lines.push(format!(
                "  [{}] {} ({})",
                index + 1,
                alt.combo_name,
                format_price(alt.total_price_value())
            ));
            for product in alt.parsed_products() {
                match product.price {
                    Some(price) => lines.push(format!("      {} {price}", product.name)),
                    None => lines.push(format!("      {}", product.name)),
                }
            }
        }
    }
    lines.join("\n")
}

/// Detail view: every item next to the storefront product picked for it.
///
/// `resolved` is empty when product matching is not configured.
pub(crate) fn render_detail(combo: &ComboResult, resolved: &[ResolvedItem]) -> String {
    let mut lines = combo_header(combo);
    lines.push(String::new());

    for (index, item) in combo.items.iter().enumerate() {
        match resolved.get(index) {
            Some(found) => {
                let marker = match (&found.product_id, found.in_band) {
                    (None, _) => "not in shop",
                    (Some(_), true) => "in shop",
                    (Some(_), false) => "closest match",
                };
                lines.push(format!(
                    "{:>2}. {} {} [{marker}]",
                    index + 1,
                    found.title,
                    format_price(found.display_price)
                ));
                if let Some(url) = &found.url {
                    lines.push(format!("    {url}"));
                }
            }
            None => lines.push(format!(
                "{:>2}. {} {}",
                index + 1,
                item.name,
                format_price(item.price)
            )),
        }
        if !item.description.is_empty() {
            lines.push(format!("    {}", item.description));
        }
        if let Some(features) = item.features.as_deref().filter(|f| !f.is_empty()) {
            lines.push(format!("    features: {}", features.join(", ")));
        }
    }

    if let Some(recommendations) = combo.recommendations.as_deref().filter(|r| !r.is_empty()) {
        lines.push(String::new());
        lines.push(recommendations.to_owned());
    }
    lines.join("\n")
}

/// Price-range matches under each product card.
pub(crate) fn render_card_matches(name: &str, matches: &[SearchCandidate]) -> String {
    let mut lines = vec![name.to_owned()];
    if matches.is_empty() {
        lines.push("    no products in this price range".to_owned());
    }
    for candidate in matches {
        lines.push(format!(
            "    {} {}",
            candidate.title.as_deref().unwrap_or("(untitled)"),
            candidate.price.map(format_price).unwrap_or_default()
        ));
    }
    lines.join("\n")
}

/// One alternative-combo entry with its thumbnail, if one was found.
pub(crate) fn render_alternative_entry(entry: &str, thumbnail: Option<&str>) -> String {
    let product = parse_alternative_product(entry);
    let price = product.price.unwrap_or_default();
    match thumbnail {
        Some(image) => format!("  {} {price}\n    {image}", product.name),
        None => format!("  {} {price}", product.name),
    }
}

pub(crate) fn render_saved_list(saved: &[SavedCombo]) -> String {
    if saved.is_empty() {
        return "No saved combos yet.".to_owned();
    }
    saved
        .iter()
        .map(|s| {
            format!(
                "{}  {}  {} | budget {} | total {} | saved {}",
                s.id,
                s.combo.display_name(),
                s.category,
                format_price(s.budget),
                format_price(s.combo.total_price),
                s.saved_at.format("%Y-%m-%d %H:%M")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
