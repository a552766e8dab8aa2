//! The single sanitization routine every record text field passes through.

/// Line-break characters that must never survive into a record field.
///
/// `U+2028` (LINE SEPARATOR) shows up in copy pasted from word processors and
/// renders as a hard break in most editors.
const LINE_BREAKS: [char; 2] = ['\n', '\u{2028}'];

/// Replaces every newline and Unicode line separator with a single space,
/// then trims surrounding whitespace.
///
/// Idempotent: `clean_text(&clean_text(s)) == clean_text(s)`.
#[must_use]
pub fn clean_text(input: &str) -> String {
    input.replace(LINE_BREAKS, " ").trim().to_owned()
}
