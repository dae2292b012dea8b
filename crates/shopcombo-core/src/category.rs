//! The fixed shopping categories a combo can be generated for, with the
//! budget presets and prompt suggestions offered for each.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A shopping category. Serialized with its display name (`"Food & drinks"`),
/// which is also how stored combo records spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    All,
    Women,
    Men,
    Beauty,
    #[serde(rename = "Food & drinks")]
    FoodAndDrinks,
    #[serde(rename = "Baby & toddler")]
    BabyAndToddler,
    Home,
    #[serde(rename = "Fitness & nutrition")]
    FitnessAndNutrition,
    Accessories,
    #[serde(rename = "Pet supplies")]
    PetSupplies,
    #[serde(rename = "Toys & games")]
    ToysAndGames,
    Electronics,
    #[serde(rename = "Arts & crafts")]
    ArtsAndCrafts,
    #[serde(rename = "Luggage & bags")]
    LuggageAndBags,
    #[serde(rename = "Sporting goods")]
    SportingGoods,
}

/// Every category, in the order the picker lists them.
pub const ALL_CATEGORIES: [Category; 15] = [
    Category::All,
    Category::Women,
    Category::Men,
    Category::Beauty,
    Category::FoodAndDrinks,
    Category::BabyAndToddler,
    Category::Home,
    Category::FitnessAndNutrition,
    Category::Accessories,
    Category::PetSupplies,
    Category::ToysAndGames,
    Category::Electronics,
    Category::ArtsAndCrafts,
    Category::LuggageAndBags,
    Category::SportingGoods,
];

impl Category {
    /// Display name, identical to the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Women => "Women",
            Category::Men => "Men",
            Category::Beauty => "Beauty",
            Category::FoodAndDrinks => "Food & drinks",
            Category::BabyAndToddler => "Baby & toddler",
            Category::Home => "Home",
            Category::FitnessAndNutrition => "Fitness & nutrition",
            Category::Accessories => "Accessories",
            Category::PetSupplies => "Pet supplies",
            Category::ToysAndGames => "Toys & games",
            Category::Electronics => "Electronics",
            Category::ArtsAndCrafts => "Arts & crafts",
            Category::LuggageAndBags => "Luggage & bags",
            Category::SportingGoods => "Sporting goods",
        }
    }

    /// Budget presets, placeholder text and suggested prompts for this category.
    #[must_use]
    pub fn budget_config(self) -> CategoryBudgetConfig {
        let (tight, mid, premium, placeholder, prompts) = match self {
            Category::All => (
                75.0,
                150.0,
                300.0,
                "e.g., A mix of products from different categories...",
                [
                    "gift bundle across categories",
                    "variety pack for myself",
                    "mixed category surprise box",
                    "essentials from multiple categories",
                ],
            ),
            Category::Women => (
                75.0,
                150.0,
                300.0,
                "e.g., A casual dress and comfortable sandals...",
                [
                    "workwear essentials",
                    "date night outfit",
                    "weekend casual look",
                    "gift bundle for her",
                ],
            ),
            Category::Men => (
                75.0,
                150.0,
                300.0,
                "e.g., A smart shirt and chinos for the office...",
                [
                    "back to school outfit",
                    "date night look",
                    "workwear essentials",
                    "gift bundle for a sneakerhead",
                ],
            ),
            Category::Beauty => (
                40.0,
                80.0,
                150.0,
                "e.g., Lipstick, mascara, and a setting spray...",
                [
                    "daily makeup routine",
                    "gift set for her",
                    "skincare and makeup combo",
                    "travel beauty kit",
                ],
            ),
            Category::FoodAndDrinks => (
                30.0,
                60.0,
                120.0,
                "e.g., Coffee beans, snacks, and a reusable bottle...",
                [
                    "morning coffee setup",
                    "healthy snack bundle",
                    "gift basket for foodies",
                    "party drinks and nibbles",
                ],
            ),
            Category::BabyAndToddler => (
                50.0,
                100.0,
                200.0,
                "e.g., Onesies, wipes, and a soft toy...",
                [
                    "newborn essentials",
                    "toddler playtime bundle",
                    "gift for new parents",
                    "nursery basics",
                ],
            ),
            Category::Home => (
                100.0,
                200.0,
                400.0,
                "e.g., Cozy living room accents and lighting...",
                [
                    "home office essentials",
                    "cozy bedroom refresh",
                    "kitchen and dining",
                    "gift bundle for new homeowners",
                ],
            ),
            Category::FitnessAndNutrition => (
                50.0,
                100.0,
                200.0,
                "e.g., Resistance bands, protein powder, and a water bottle...",
                [
                    "home workout kit",
                    "post-workout nutrition",
                    "gym bag essentials",
                    "gift for a fitness enthusiast",
                ],
            ),
            Category::Accessories => (
                40.0,
                80.0,
                150.0,
                "e.g., Sunglasses, a watch, and a belt...",
                [
                    "everyday carry essentials",
                    "gift bundle for him",
                    "summer accessories",
                    "work and weekend combo",
                ],
            ),
            Category::PetSupplies => (
                30.0,
                60.0,
                120.0,
                "e.g., Food, treats, and a new toy...",
                [
                    "new pet starter kit",
                    "dog walking bundle",
                    "cat comfort pack",
                    "gift for a pet lover",
                ],
            ),
            Category::ToysAndGames => (
                40.0,
                80.0,
                150.0,
                "e.g., Board game, puzzle, and a plush...",
                [
                    "family game night bundle",
                    "kids birthday gift",
                    "puzzle and craft combo",
                    "gift for a gamer",
                ],
            ),
            Category::Electronics => (
                100.0,
                250.0,
                500.0,
                "e.g., A gaming keyboard and a mouse with high DPI...",
                [
                    "gaming setup",
                    "work from home tech",
                    "headphones and speaker",
                    "gift bundle for a techie",
                ],
            ),
            Category::ArtsAndCrafts => (
                35.0,
                70.0,
                140.0,
                "e.g., Markers, sketchbook, and glue...",
                [
                    "beginner art kit",
                    "kids craft bundle",
                    "gift for an artist",
                    "scrapbooking essentials",
                ],
            ),
            Category::LuggageAndBags => (
                60.0,
                120.0,
                250.0,
                "e.g., Carry-on bag and a toiletry pouch...",
                [
                    "weekend trip combo",
                    "work and travel bundle",
                    "gift for a frequent traveler",
                    "daily carry essentials",
                ],
            ),
            Category::SportingGoods => (
                50.0,
                100.0,
                200.0,
                "e.g., Tennis racket, balls, and a grip...",
                [
                    "running essentials",
                    "outdoor adventure kit",
                    "gift for a sports fan",
                    "team sports bundle",
                ],
            ),
        };

        CategoryBudgetConfig {
            budget_chips: [
                BudgetChip {
                    tier: BudgetTier::Tight,
                    value: tight,
                },
                BudgetChip {
                    tier: BudgetTier::Mid,
                    value: mid,
                },
                BudgetChip {
                    tier: BudgetTier::Premium,
                    value: premium,
                },
            ],
            input_placeholder: placeholder,
            suggested_prompts: prompts,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    /// Matches the display name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Tight,
    Mid,
    Premium,
}

impl BudgetTier {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BudgetTier::Tight => "Tight",
            BudgetTier::Mid => "Mid-Range",
            BudgetTier::Premium => "Premium",
        }
    }
}

/// A one-tap budget preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetChip {
    pub tier: BudgetTier,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudgetConfig {
    pub budget_chips: [BudgetChip; 3],
    pub input_placeholder: &'static str,
    pub suggested_prompts: [&'static str; 4],
}

impl CategoryBudgetConfig {
    /// Looks up the preset value for `tier`.
    #[must_use]
    pub fn chip(&self, tier: BudgetTier) -> f64 {
        self.budget_chips
            .iter()
            .find(|chip| chip.tier == tier)
            .map_or(0.0, |chip| chip.value)
    }
}

/// Builds the free-text intent sent to the combo service.
///
/// Uses the shopper's own words when they typed any, otherwise a generic
/// request for the category: `"I want electronics products"`.
#[must_use]
pub fn build_search_term(category: Category, needs: &str) -> String {
    let needs = needs.trim();
    if needs.is_empty() {
        format!("I want {} products", category.name().to_lowercase())
    } else {
        needs.to_owned()
    }
}

#[cfg(test)]
#[path = "category_test.rs"]
mod tests;
