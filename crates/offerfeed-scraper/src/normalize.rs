//! Pure string helpers used to turn raw feed fields into record values.
//!
//! Nothing here allocates more than it must or touches the network; every
//! function is total (no panics, no errors).

use std::sync::LazyLock;

use regex::Regex;

pub use offerfeed_core::clean_text;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

const LINE_BREAK_TAG: &str = "<br />";

/// Removes `suffix` when `input` ends with it; otherwise returns `input`.
/// An empty suffix is a no-op.
#[must_use]
pub fn strip_suffix<'a>(input: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return input;
    }
    input.strip_suffix(suffix).unwrap_or(input)
}

/// Removes `prefix` when `input` starts with it; otherwise returns `input`.
/// An empty prefix is a no-op.
#[must_use]
pub fn strip_prefix<'a>(input: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return input;
    }
    input.strip_prefix(prefix).unwrap_or(input)
}

/// Splits a per-unit price like `"1,99/kg"` into `("1,99", "kg")`.
///
/// Splits on the *last* `/`: everything before it is the amount (inner
/// slashes kept), the final segment is the unit. Both halves are trimmed.
/// Returns `None` when there is no `/` at all.
#[must_use]
pub fn split_unit_price(raw: &str) -> Option<(String, String)> {
    let (amount, unit) = raw.rsplit_once('/')?;
    Some((amount.trim().to_owned(), unit.trim().to_owned()))
}

/// First maximal run of decimal digits in `input`, if any.
#[must_use]
pub fn first_numeric_token(input: &str) -> Option<&str> {
    DIGIT_RUN.find(input).map(|m| m.as_str())
}

/// Keeps the text before the first markup tag.
///
/// `<br />` line breaks are turned into spaces first so they do not end the
/// text; the next remaining `<` is a hard stop.
#[must_use]
pub fn truncate_at_first_tag(html: &str) -> String {
    let flattened = html.replace(LINE_BREAK_TAG, " ");
    match flattened.find('<') {
        Some(end) => flattened[..end].to_owned(),
        None => flattened,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
