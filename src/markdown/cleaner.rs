//! Markdown body cleanup applied before HTML conversion.

use regex::Regex;
use std::sync::LazyLock;

use crate::pipeline::{Pipeline, Step};
use crate::util::collapse_blank_lines;

static LANGUAGE_MARKER_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^!\S+\s*$").expect("LANGUAGE_MARKER_LINE_RE should compile")
});
static STATUS_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!Language|!Status").expect("STATUS_MARKER_RE should compile"));
static BASH_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^bash\s*$").expect("BASH_LINE_RE should compile"));
static USAGE_EMOJI_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?im)^##[ \t]*",
        "\u{1F6E0}\u{FE0F}?",
        r"[ \t]*(?:Como Utilizar|How to use)"
    ))
    .expect("USAGE_EMOJI_HEADING_RE should compile")
});
static USAGE_PLAIN_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^##[ \t]*(?:Como Utilizar|How to use)")
        .expect("USAGE_PLAIN_HEADING_RE should compile")
});
static SUBHEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##(?:[^#]|$)").expect("SUBHEADING_RE should compile"));

/// Cleanup steps in application order.
pub const BODY_STEPS: &[Step] = &[
    Step::new("strip_language_marker_lines", strip_language_marker_lines),
    Step::new("strip_status_markers", strip_status_markers),
    Step::new("strip_bash_lines", strip_bash_lines),
    Step::new("strip_usage_section_emoji", strip_usage_section_emoji),
    Step::new("strip_usage_section_plain", strip_usage_section_plain),
    Step::new("space_before_subheadings", space_before_subheadings),
    Step::new("collapse_blank_lines", collapse_blank_lines),
];

/// Runs every cleanup step over a Markdown body and trims the result.
pub fn clean_body(body: &str) -> String {
    Pipeline::new(BODY_STEPS).run(body).trim().to_string()
}

/// Removes lines made only of a `!token` marker such as `!Language`.
pub fn strip_language_marker_lines(body: &str) -> String {
    LANGUAGE_MARKER_LINE_RE.replace_all(body, "").into_owned()
}

/// Removes inline `!Language` and `!Status` markers.
pub fn strip_status_markers(body: &str) -> String {
    STATUS_MARKER_RE.replace_all(body, "").into_owned()
}

/// Removes lines holding only the word `bash`, left over from code fences.
pub fn strip_bash_lines(body: &str) -> String {
    BASH_LINE_RE.replace_all(body, "").into_owned()
}

/// Removes "How to use" sections whose heading carries the tools emoji.
pub fn strip_usage_section_emoji(body: &str) -> String {
    remove_sections(body, &USAGE_EMOJI_HEADING_RE)
}

/// Removes "How to use" sections with a plain heading.
pub fn strip_usage_section_plain(body: &str) -> String {
    remove_sections(body, &USAGE_PLAIN_HEADING_RE)
}

/// Puts a blank line before every level two heading.
pub fn space_before_subheadings(body: &str) -> String {
    SUBHEADING_RE.replace_all(body, "\n${0}").into_owned()
}

/// Cuts every section starting at a `heading` match up to the next level
/// two heading, or to the end of text when none follows.
fn remove_sections(body: &str, heading: &Regex) -> String {
    let mut result = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(found) = heading.find(rest) {
        result.push_str(&rest[..found.start()]);
        let after = &rest[found.end()..];
        rest = match SUBHEADING_RE.find(after) {
            Some(next) => &after[next.start()..],
            None => "",
        };
    }

    result.push_str(rest);
    result
}
