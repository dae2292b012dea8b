//! Search-query derivation from a recommended product's name.
//!
//! Names from the combo service are long and adjective-heavy ("Premium Full
//! Grain Leather Watch Strap (Brown)"). Storefront search does better with
//! the product type plus at most two modifiers, so the query is anchored on
//! the right-most head noun and padded leftwards with words that are not
//! generic materials or marketing adjectives.

/// Product-type words a query is anchored on.
const HEAD_NOUNS: &[&str] = &[
    "watch", "strap", "case", "tool", "cloth", "roll", "bag", "box", "stand", "holder",
];

/// Materials, marketing adjectives and filler that make poor search terms.
const STOP_WORDS: &[&str] = &[
    "premium", "luxury", "high", "quality", "full", "grain", "genuine", "slim", "fit",
    "stretch", "performance", "modern", "classic", "vintage", "organic", "natural", "soft",
    "lightweight", "heavyweight", "durable", "the", "a", "an", "and", "or", "for", "with",
    "pack", "3-pack", "2-pack", "cotton", "modal", "wool", "linen", "silk", "polyester", "blend",
    "100%", "button-down", "button", "down", "up", "neck", "v-neck", "crew", "stainless",
    "steel", "nylon", "leather", "top", "single", "ballistic", "dive", "nato", "microfiber",
    "spring", "bar",
];

const MAX_QUERY_TOKENS: usize = 3;

fn is_head_noun(word: &str) -> bool {
    HEAD_NOUNS.contains(&word)
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Lowercased words of `name` longer than two characters, after dropping
/// parentheses and ASCII digits and splitting hyphenated words.
fn tokenize(name: &str) -> Vec<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '(' | ')') && !c.is_ascii_digit())
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();

    cleaned
        .split(' ')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| w.chars().count() > 2)
        .collect()
}

/// Derives a storefront search query for a recommended product.
///
/// Picks the right-most head noun (or the last word when there is none),
/// keeps the word before it unless that word is a stop word, then adds one
/// more non-stop-word modifier from further left. The modifier scan starts
/// one position before the first word it could take, so a qualifying word
/// directly ahead of a kept pair is passed over.
///
/// When no usable word survives, falls back to the last `" - "` segment of
/// `category`, lowercased, or `"product"`.
#[must_use]
pub fn select_query(product_name: &str, category: &str) -> String {
    let words = tokenize(product_name);

    let Some(last) = words.len().checked_sub(1) else {
        return category_fallback(category);
    };
    let head = (0..words.len())
        .rev()
        .find(|&i| is_head_noun(&words[i]))
        .unwrap_or(last);

    let mut terms: Vec<&str> = vec![words[head].as_str()];

    if head > 0 {
        let prev = words[head - 1].as_str();
        if is_head_noun(prev) || !is_stop_word(prev) {
            terms.insert(0, prev);
        }
    }

    if let Some(start) = head.checked_sub(terms.len() + 1) {
        if terms.len() < MAX_QUERY_TOKENS {
            let modifier = words[..=start]
                .iter()
                .rev()
                .map(String::as_str)
                .find(|w| !is_stop_word(w));
            if let Some(modifier) = modifier {
                terms.insert(0, modifier);
            }
        }
    }

    terms.join(" ")
}

fn category_fallback(category: &str) -> String {
    category
        .split(" - ")
        .last()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "product".to_owned())
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
