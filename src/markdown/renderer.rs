//! Markdown to HTML conversion for README bodies.

use comrak::{Arena, Options};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::error::ProcessingError;
use crate::pipeline::{Pipeline, Step};

static BRACKET_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("BRACKET_LABEL_RE should compile"));
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+\.)\s+").expect("LIST_ITEM_RE should compile"));
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6} ").expect("HEADING_RE should compile"));

/// Source rewrites applied before parsing, in order.
pub const PREPARE_STEPS: &[Step] = &[
    Step::new("unbold_bracket_labels", unbold_bracket_labels),
    Step::new("separate_list_items", separate_list_items),
    Step::new("separate_headings_from_lists", separate_headings_from_lists),
];

/// Renders README Markdown bodies to HTML fragments.
///
/// Enables tables, footnotes and description lists, passes raw HTML
/// through, and turns every single newline into a hard line break.
/// Before parsing, the source is prepared so that list items always open
/// a real list instead of continuing the paragraph above them.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with README conversion options.
    pub fn new() -> Self {
        let mut options = Options::default();

        // Extension options
        options.extension.table = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;
        options.extension.strikethrough = true;

        // Render options: single newlines become <br />, raw HTML kept
        options.render.hardbreaks = true;
        options.render.unsafe_ = true;

        Self { options }
    }

    /// Renders Markdown body to HTML string.
    ///
    /// Runs the [`PREPARE_STEPS`] over `content`, parses the result into
    /// an AST and formats it as HTML. The output is not validated.
    ///
    /// # Arguments
    ///
    /// * `content`: Cleaned Markdown body
    ///
    /// # Returns
    ///
    /// Rendered HTML as string
    ///
    /// # Errors
    ///
    /// Returns error if HTML formatting fails or produces invalid UTF8
    pub fn render(&self, content: &str) -> Result<String, ProcessingError> {
        let prepared = prepare(content);

        let arena = Arena::new();
        let root = comrak::parse_document(&arena, &prepared, &self.options);

        let mut output = Vec::with_capacity(prepared.len() * 2);
        comrak::format_html(root, &self.options, &mut output).map_err(|e| ProcessingError {
            stage: "render",
            message: e.to_string(),
        })?;

        String::from_utf8(output).map_err(|e| ProcessingError {
            stage: "render",
            message: e.to_string(),
        })
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies every preparation step to Markdown source.
pub fn prepare(content: &str) -> String {
    Pipeline::new(PREPARE_STEPS).run(content)
}

/// Strips bold markers inside `[...]` spans, so `[**Text**]` becomes `[Text]`.
pub fn unbold_bracket_labels(content: &str) -> String {
    BRACKET_LABEL_RE
        .replace_all(content, |caps: &Captures| {
            format!("[{}]", caps[1].replace("**", ""))
        })
        .into_owned()
}

/// Inserts a blank line before every list item not already preceded by one.
pub fn separate_list_items(content: &str) -> String {
    separate_lines(content, |_, line| is_list_item(line))
}

/// Inserts a blank line between a heading and a list item right below it.
pub fn separate_headings_from_lists(content: &str) -> String {
    separate_lines(content, |previous, line| {
        HEADING_RE.is_match(previous) && is_list_item(line)
    })
}

fn is_list_item(line: &str) -> bool {
    LIST_ITEM_RE.is_match(line)
}

/// Inserts an empty line wherever `needs_gap(previous, line)` holds and
/// the previous line is not already blank. Fenced code is left untouched.
fn separate_lines(content: &str, needs_gap: impl Fn(&str, &str) -> bool) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut previous: Option<&str> = None;

    for line in content.split('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        } else if !in_fence
            && let Some(prev) = previous
            && !prev.trim().is_empty()
            && needs_gap(prev, line)
        {
            lines.push("");
        }

        lines.push(line);
        previous = Some(line);
    }

    lines.join("\n")
}
