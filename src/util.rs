//! Shared text helpers.

use regex::Regex;
use std::sync::LazyLock;

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("BLANK_RUN_RE should compile"));

/// Escapes HTML special characters in text content.
///
/// Only `&`, `<` and `>` are replaced. Quotes are left alone since the
/// result is only ever placed between tags, never inside attributes.
///
/// # Arguments
///
/// * `text`: Plain text to escape
///
/// # Returns
///
/// HTML safe string
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Collapses runs of three or more newlines to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}
