//! Tolerant field lookup on storefront product records.
//!
//! Search backends disagree on where price and image live (`price`,
//! `priceRange.minVariantPrice`, `featuredImage.url`, a bare `image` string,
//! ...). Each lookup tries a fixed list of paths in order and takes the
//! first one that yields a usable value.

use serde_json::Value;
use shopcombo_core::parse_decimal;

/// Parses a price that may be a number, a currency string (`"$19.99"`) or an
/// object with an `amount`. Only finite positive values count.
fn parse_price_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_currency(s),
        Value::Object(map) => match map.get("amount")? {
            Value::String(s) if !s.is_empty() => parse_currency(s),
            Value::Number(n) => n.as_f64()?,
            _ => return None,
        },
        _ => return None,
    };
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

/// Keeps only digits and dots, then reads the leading decimal.
fn parse_currency(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_decimal(&cleaned)
}

fn first_element(value: Option<&Value>) -> Option<&Value> {
    value.and_then(Value::as_array).and_then(|a| a.first())
}

/// Non-empty string at `value`.
fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Non-empty string at a `/`-separated JSON pointer below `value`.
fn str_at(value: &Value, pointer: &str) -> Option<String> {
    non_empty_str(value.pointer(pointer))
}

/// Price of a storefront product, checking in order: `price`,
/// `priceRange.minVariantPrice`, `priceRange.maxVariantPrice`, the first
/// variant's `price` then `priceV2`, and a root-level `priceV2`.
#[must_use]
pub fn product_price(product: &Value) -> Option<f64> {
    let first_variant = first_element(product.get("variants"));

    [
        product.get("price"),
        product.pointer("/priceRange/minVariantPrice"),
        product.pointer("/priceRange/maxVariantPrice"),
        first_variant.and_then(|v| v.get("price")),
        first_variant.and_then(|v| v.get("priceV2")),
        product.get("priceV2"),
    ]
    .into_iter()
    .flatten()
    .find_map(parse_price_value)
}

/// Image URL of a storefront product, checking in order: featured image,
/// featured media (preview, then direct), the first entry of `images`,
/// the first entry of `media`, a direct `image`, and the first variant's image.
#[must_use]
pub fn product_image(product: &Value) -> Option<String> {
    if let Some(url) = str_at(product, "/featuredImage/url")
        .or_else(|| str_at(product, "/featuredMedia/preview/image/url"))
        .or_else(|| str_at(product, "/featuredMedia/image/url"))
    {
        return Some(url);
    }

    if let Some(first) = first_element(product.get("images")) {
        if let Some(url) = str_at(first, "/url").or_else(|| non_empty_str(Some(first))) {
            return Some(url);
        }
    }

    if let Some(first) = first_element(product.get("media")) {
        if let Some(url) =
            str_at(first, "/preview/image/url").or_else(|| str_at(first, "/image/url"))
        {
            return Some(url);
        }
    }

    if let Some(url) = str_at(product, "/image/url").or_else(|| non_empty_str(product.get("image")))
    {
        return Some(url);
    }

    first_element(product.get("variants")).and_then(|variant| {
        str_at(variant, "/image/url").or_else(|| str_at(variant, "/featuredImage/url"))
    })
}

/// Product identifier as a string; numeric ids are stringified.
#[must_use]
pub fn product_id(product: &Value) -> Option<String> {
    match product.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[must_use]
pub fn product_title(product: &Value) -> Option<String> {
    non_empty_str(product.get("title"))
}

/// Storefront link, from `onlineStoreUrl` or the search result's `url`.
#[must_use]
pub fn product_url(product: &Value) -> Option<String> {
    non_empty_str(product.get("onlineStoreUrl")).or_else(|| non_empty_str(product.get("url")))
}

/// `false` only when the record explicitly says it is unavailable.
#[must_use]
pub fn is_available(product: &Value) -> bool {
    product
        .get("available")
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
