use super::*;

// -----------------------------------------------------------------------
// strip_suffix / strip_prefix
// -----------------------------------------------------------------------

#[test]
fn strip_suffix_removes_trailing_asterisk() {
    assert_eq!(strip_suffix("12.99*", "*"), "12.99");
}

#[test]
fn strip_suffix_is_noop_when_absent() {
    assert_eq!(strip_suffix("12.99", "*"), "12.99");
}

#[test]
fn strip_suffix_only_removes_one_occurrence() {
    assert_eq!(strip_suffix("1.99**", "*"), "1.99*");
}

#[test]
fn strip_suffix_empty_suffix_is_noop() {
    assert_eq!(strip_suffix("1.99", ""), "1.99");
}

#[test]
fn strip_prefix_removes_leading_label() {
    assert_eq!(
        strip_prefix("versch. Sorten, je 500 g", "versch. Sorten"),
        ", je 500 g"
    );
}

#[test]
fn strip_prefix_is_case_sensitive() {
    assert_eq!(strip_prefix("uvp 1.49", "UVP"), "uvp 1.49");
}

#[test]
fn strip_prefix_empty_prefix_is_noop() {
    assert_eq!(strip_prefix("statt 2.49", ""), "statt 2.49");
}

// -----------------------------------------------------------------------
// split_unit_price
// -----------------------------------------------------------------------

#[test]
fn split_unit_price_simple() {
    assert_eq!(
        split_unit_price("1,99/kg"),
        Some(("1,99".to_owned(), "kg".to_owned()))
    );
}

#[test]
fn split_unit_price_without_slash_is_none() {
    assert_eq!(split_unit_price("noslash"), None);
}

#[test]
fn split_unit_price_keeps_inner_slashes_in_amount() {
    assert_eq!(
        split_unit_price("1 kg = 2.99 / 1 l / l"),
        Some(("1 kg = 2.99 / 1 l".to_owned(), "l".to_owned()))
    );
}

#[test]
fn split_unit_price_trims_both_halves() {
    assert_eq!(
        split_unit_price(" 0.99 / kg "),
        Some(("0.99".to_owned(), "kg".to_owned()))
    );
}

// -----------------------------------------------------------------------
// first_numeric_token
// -----------------------------------------------------------------------

#[test]
fn first_numeric_token_finds_first_run() {
    assert_eq!(first_numeric_token("UVP 1.49"), Some("1"));
    assert_eq!(first_numeric_token("statt 249"), Some("249"));
}

#[test]
fn first_numeric_token_none_without_digits() {
    assert_eq!(first_numeric_token("Aktion"), None);
    assert_eq!(first_numeric_token(""), None);
}

// -----------------------------------------------------------------------
// truncate_at_first_tag
// -----------------------------------------------------------------------

#[test]
fn truncate_at_first_tag_flattens_breaks_then_stops() {
    assert_eq!(truncate_at_first_tag("abc<br />def<b>stop</b>"), "abc def");
}

#[test]
fn truncate_at_first_tag_without_markup_is_unchanged() {
    assert_eq!(truncate_at_first_tag("Frisch lecker"), "Frisch lecker");
}

#[test]
fn truncate_at_first_tag_leading_tag_yields_empty() {
    assert_eq!(truncate_at_first_tag("<p>Text</p>"), "");
}

#[test]
fn truncate_at_first_tag_other_break_forms_are_hard_stops() {
    assert_eq!(truncate_at_first_tag("a<br>b"), "a");
}

#[test]
fn truncate_at_first_tag_output_never_contains_angle_bracket() {
    for input in ["a<", "<", "x<br /><y", "1 < 2", "<br /><br />"] {
        assert!(!truncate_at_first_tag(input).contains('<'), "{input:?}");
    }
}
