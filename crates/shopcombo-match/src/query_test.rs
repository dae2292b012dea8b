use super::*;

#[test]
fn watch_strap_drops_adjectives_and_materials() {
    let query = select_query("Premium Leather Watch Strap (Brown)", "Accessories");
    assert_eq!(query, "watch strap");
    assert!(query.ends_with("strap"));
    assert!(!query.contains("premium"));
    assert!(!query.contains("leather"));
}

#[test]
fn right_most_head_noun_anchors_the_query() {
    assert_eq!(select_query("Leather Watch Case Box", "Accessories"), "case box");
}

#[test]
fn last_word_anchors_when_no_head_noun() {
    assert_eq!(
        select_query("Wireless Noise Cancelling Earbuds", "Electronics - Audio"),
        "wireless cancelling earbuds"
    );
}

#[test]
fn stop_word_before_anchor_is_not_kept() {
    assert_eq!(select_query("Organic Cotton Crew Socks", "Men"), "socks");
}

#[test]
fn modifier_scan_skips_word_directly_before_kept_pair() {
    // "travel" sits right before "organizer roll" and is passed over.
    assert_eq!(
        select_query("Compact Travel Organizer Roll", "Luggage & bags"),
        "compact organizer roll"
    );
}

#[test]
fn digits_hyphens_and_short_words_are_removed() {
    assert_eq!(select_query("3-Pack Slim-Fit T-Shirts", "Men - Tops"), "shirts");
}

#[test]
fn query_has_at_most_three_words() {
    let query = select_query("Alpine Explorer Summit Trail Hiking Backpack", "Sporting goods");
    assert!(query.split(' ').count() <= 3, "query was {query:?}");
    assert!(query.ends_with("backpack"));
}

#[test]
fn falls_back_to_last_category_segment() {
    assert_eq!(select_query("12 (3)", "Electronics - Audio"), "audio");
    assert_eq!(select_query("AB", "Home"), "home");
}

#[test]
fn falls_back_to_product_when_nothing_usable() {
    assert_eq!(select_query("", ""), "product");
    assert_eq!(select_query("(42)", ""), "product");
}

#[test]
fn words_are_lowercased() {
    assert_eq!(select_query("CANVAS TOTE BAG", "Luggage & bags"), "tote bag");
}
