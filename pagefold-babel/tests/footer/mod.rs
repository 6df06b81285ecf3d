//! Footer placement tests

use crate::common::fixed_now;
use pagefold_babel::footer::{FooterConfig, FooterLayout};
use pagefold_babel::FooterError;
use proptest::prelude::*;

fn config(layout: &str, left: &str, right: &str) -> FooterConfig {
    FooterConfig::new(true, layout, left, right, "%Y-%m-%d").expect("valid layout")
}

#[test]
fn test_defaults() {
    let footer = FooterConfig::default();
    assert!(footer.is_enabled());
    assert_eq!(footer.layout(), FooterLayout::Single);
    assert_eq!(
        footer.footer_for_page_at(3, fixed_now()).unwrap(),
        ("Last updated: 2024-03-09".to_string(), "Page 3".to_string())
    );
}

#[test]
fn test_double_layout_swaps_on_even_pages() {
    let footer = config("double", "L{page}", "R{page}");
    let now = fixed_now();
    assert_eq!(
        footer.footer_for_page_at(1, now).unwrap(),
        ("L1".to_string(), "R1".to_string())
    );
    assert_eq!(
        footer.footer_for_page_at(2, now).unwrap(),
        ("R2".to_string(), "L2".to_string())
    );
}

#[test]
fn test_disabled_footer_is_empty() {
    let footer = FooterConfig::disabled();
    assert_eq!(
        footer.footer_for_page_at(7, fixed_now()).unwrap(),
        (String::new(), String::new())
    );
}

#[test]
fn test_custom_date_format() {
    let footer = FooterConfig::new(true, "single", "{date}", "", "%d/%m/%Y").unwrap();
    let (left, right) = footer.footer_for_page_at(1, fixed_now()).unwrap();
    assert_eq!(left, "09/03/2024");
    assert_eq!(right, "");
}

#[test]
fn test_escaped_braces_and_unknown_placeholders() {
    let footer = config("single", "{{draft}} {owner}", "p.{page}");
    let (left, right) = footer.footer_for_page_at(4, fixed_now()).unwrap();
    assert_eq!(left, "{draft} {owner}");
    assert_eq!(right, "p.4");
}

#[test]
fn test_invalid_layout_is_rejected() {
    let err = FooterConfig::new(true, "triple", "", "", "%Y").unwrap_err();
    assert!(matches!(err, FooterError::InvalidLayout(ref l) if l == "triple"));
    assert!(err.to_string().contains("triple"));
}

#[test]
fn test_malformed_templates_are_errors() {
    for template in ["Page {page", "oops }", "{a{b}"] {
        let footer = config("single", template, "");
        let err = footer.footer_for_page_at(1, fixed_now()).unwrap_err();
        assert!(
            matches!(err, FooterError::Template { .. }),
            "{template}: {err:?}"
        );
    }
}

#[test]
fn test_page_label_replaces_number_but_keeps_parity() {
    let footer = config("double", "left", "Page {page}");
    let (left, right) = footer
        .footer_for_page_with_label(2, "#", fixed_now())
        .unwrap();
    assert_eq!(left, "Page #");
    assert_eq!(right, "left");
}

proptest! {
    #[test]
    fn single_layout_never_swaps(page in 1u32..10_000) {
        let footer = config("single", "L", "R{page}");
        let (left, right) = footer.footer_for_page_at(page, fixed_now()).unwrap();
        prop_assert_eq!(left, "L");
        prop_assert_eq!(right, format!("R{page}"));
    }

    #[test]
    fn double_layout_is_single_swapped_on_even_pages(page in 1u32..10_000) {
        let single = config("single", "{date}|{page}", "Page {page}");
        let double = config("double", "{date}|{page}", "Page {page}");
        let now = fixed_now();

        let (sl, sr) = single.footer_for_page_at(page, now).unwrap();
        let (dl, dr) = double.footer_for_page_at(page, now).unwrap();
        if page % 2 == 0 {
            prop_assert_eq!((dl, dr), (sr, sl));
        } else {
            prop_assert_eq!((dl, dr), (sl, sr));
        }
    }

    #[test]
    fn disabled_footer_is_always_empty(page in 1u32..10_000, double in any::<bool>()) {
        let layout = if double { "double" } else { "single" };
        let footer = FooterConfig::new(false, layout, "{date}", "{page}", "%Y").unwrap();
        let (left, right) = footer.footer_for_page_at(page, fixed_now()).unwrap();
        prop_assert!(left.is_empty() && right.is_empty());
    }
}
