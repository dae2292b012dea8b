use shopcombo_core::{is_usable_number, ComboResult};

use crate::error::Invalidity;

/// Returns the first numeric defect in `combo`, checking the total, then
/// each item price, then each alternative combo's parsed total.
#[must_use]
pub fn find_invalidity(combo: &ComboResult) -> Option<Invalidity> {
    if !is_usable_number(combo.total_price) {
        return Some(Invalidity::TotalPrice {
            value: combo.total_price,
        });
    }

    if let Some((index, item)) = combo
        .items
        .iter()
        .enumerate()
        .find(|(_, item)| !is_usable_number(item.price))
    {
        return Some(Invalidity::ItemPrice {
            index,
            name: item.name.clone(),
            value: item.price,
        });
    }

    combo
        .alternatives()
        .iter()
        .enumerate()
        .find(|(_, alt)| !is_usable_number(alt.total_price_value()))
        .map(|(index, alt)| Invalidity::AlternativeTotal {
            index,
            raw: alt.total_price.clone(),
        })
}

/// `true` when any price in `combo` is `NaN` or infinite.
#[must_use]
pub fn is_invalid(combo: &ComboResult) -> bool {
    find_invalidity(combo).is_some()
}

#[cfg(test)]
mod tests {
    use shopcombo_core::{AlternativeCombo, Product};

    use super::*;

    fn item(name: &str, price: f64) -> Product {
        Product {
            name: name.to_owned(),
            price,
            description: String::new(),
            features: None,
            category: None,
            why_included: None,
        }
    }

    fn combo(total_price: f64, prices: &[f64], alt_totals: Option<&[&str]>) -> ComboResult {
        ComboResult {
            items: prices
                .iter()
                .enumerate()
                .map(|(i, p)| item(&format!("item-{i}"), *p))
                .collect(),
            total_price,
            savings_percentage: 0,
            explanation: String::new(),
            combo_name: None,
            search_intent: None,
            budget_utilization: None,
            use_cases: None,
            recommendations: None,
            alternative_combos: alt_totals.map(|totals| {
                totals
                    .iter()
                    .map(|t| AlternativeCombo {
                        combo_name: "alt".to_owned(),
                        products: Vec::new(),
                        total_price: (*t).to_owned(),
                    })
                    .collect()
            }),
        }
    }

    #[test]
    fn well_formed_combo_is_valid() {
        let c = combo(235.5, &[120.0, 115.5], Some(&["100", "99.99"]));
        assert!(!is_invalid(&c));
        assert_eq!(find_invalidity(&c), None);
    }

    #[test]
    fn nan_total_is_invalid() {
        let c = combo(f64::NAN, &[10.0], None);
        assert!(matches!(find_invalidity(&c), Some(Invalidity::TotalPrice { .. })));
    }

    #[test]
    fn infinite_total_is_invalid() {
        let c = combo(f64::INFINITY, &[], None);
        assert!(is_invalid(&c));
    }

    #[test]
    fn bad_item_price_reports_its_index() {
        let c = combo(30.0, &[10.0, f64::NAN, f64::NEG_INFINITY], None);
        match find_invalidity(&c) {
            Some(Invalidity::ItemPrice { index, name, value }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "item-1");
                assert!(value.is_nan());
            }
            other => panic!("expected ItemPrice, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_alternative_total_is_invalid() {
        let c = combo(30.0, &[30.0], Some(&["25", "call us"]));
        assert_eq!(
            find_invalidity(&c),
            Some(Invalidity::AlternativeTotal {
                index: 1,
                raw: "call us".to_owned(),
            })
        );
    }

    #[test]
    fn empty_combo_with_finite_total_is_valid() {
        assert!(!is_invalid(&combo(0.0, &[], Some(&[]))));
    }
}
