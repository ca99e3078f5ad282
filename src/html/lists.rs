//! List structure repairs on rendered HTML.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static BULLET_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<p>\s*[-*+]\s+(.*?)</p>\s*$").expect("BULLET_PARAGRAPH_RE should compile")
});
static NUMBERED_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<p>\s*\d+\.\s+(.*?)</p>\s*$").expect("NUMBERED_PARAGRAPH_RE should compile")
});
// Paragraph bodies may hold inline tags but never a closing </p>.
static PARAGRAPH_ONLY_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<li>\s*((?:<p>(?:[^<]|<[^/]|</[^p]|</p[^>])*</p>\s*)+)</li>")
        .expect("PARAGRAPH_ONLY_ITEM_RE should compile")
});
static PARAGRAPH_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</p>\s*<p>").expect("PARAGRAPH_GAP_RE should compile"));
static ITEM_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+-\s+").expect("ITEM_SEPARATOR_RE should compile"));

const ITEM_OPEN: &str = "<li>";
const ITEM_CLOSE: &str = "</li>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            Self::Unordered => "<ul>",
            Self::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::Unordered => "</ul>",
            Self::Ordered => "</ol>",
        }
    }

    /// Detects a paragraph line holding one list item in Markdown syntax.
    fn from_paragraph(line: &str) -> Option<(Self, &str)> {
        if let Some(caps) = BULLET_PARAGRAPH_RE.captures(line) {
            return caps.get(1).map(|item| (Self::Unordered, item.as_str()));
        }
        NUMBERED_PARAGRAPH_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|item| (Self::Ordered, item.as_str()))
    }
}

/// Turns paragraphs that contain literal list syntax into list elements.
///
/// Works line by line. Consecutive `<p>- item</p>` lines become one `<ul>`
/// and consecutive `<p>1. item</p>` lines one `<ol>`. A change of kind or
/// any other line closes the open list, as does the end of input.
pub fn repair_lists(html: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut open: Option<ListKind> = None;

    for line in html.split('\n') {
        match ListKind::from_paragraph(line) {
            Some((kind, item)) => {
                if open != Some(kind) {
                    if let Some(current) = open {
                        lines.push(current.close_tag().to_string());
                    }
                    lines.push(kind.open_tag().to_string());
                    open = Some(kind);
                }
                lines.push(format!("{ITEM_OPEN}{item}{ITEM_CLOSE}"));
            }
            None => {
                if let Some(current) = open.take() {
                    lines.push(current.close_tag().to_string());
                }
                lines.push(line.to_string());
            }
        }
    }

    if let Some(current) = open {
        lines.push(current.close_tag().to_string());
    }

    lines.join("\n")
}

/// Unwraps paragraphs inside list items made only of paragraphs.
///
/// `<li><p>X</p></li>` becomes `<li>X</li>`; several paragraphs are joined
/// with a double line break. Items holding anything besides paragraphs,
/// such as nested lists, are left as they are.
pub fn flatten_list_paragraphs(html: &str) -> String {
    PARAGRAPH_ONLY_ITEM_RE
        .replace_all(html, |caps: &Captures| {
            let inner = PARAGRAPH_GAP_RE.replace_all(caps[1].trim(), "<br /><br />");
            let inner = inner.strip_prefix("<p>").unwrap_or(&inner);
            let inner = inner.strip_suffix("</p>").unwrap_or(inner);
            format!("{ITEM_OPEN}{inner}{ITEM_CLOSE}")
        })
        .into_owned()
}

/// Splits list items that join several entries with ` - `.
///
/// A separator splits only when followed by `<strong>`, an ASCII capital
/// or an accented Latin letter, so lowercase continuations stay intact.
/// Items containing nested lists are never split; their own leaf items
/// still are.
pub fn split_run_together_items(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find(ITEM_OPEN) {
        let content_start = start + ITEM_OPEN.len();
        let Some(end) = rest[content_start..]
            .find(ITEM_CLOSE)
            .map(|offset| content_start + offset)
        else {
            break;
        };

        result.push_str(&rest[..start]);
        let content = &rest[content_start..end];

        if content.contains("<li") || content.contains("<ul") || content.contains("<ol") {
            result.push_str(ITEM_OPEN);
            rest = &rest[content_start..];
            continue;
        }

        match split_item(content) {
            Some(items) => result.push_str(&items),
            None => result.push_str(&rest[start..end + ITEM_CLOSE.len()]),
        }
        rest = &rest[end + ITEM_CLOSE.len()..];
    }

    result.push_str(rest);
    result
}

fn split_item(content: &str) -> Option<String> {
    if !content.contains(" - ") {
        return None;
    }

    let mut parts = Vec::new();
    let mut last = 0;
    for separator in ITEM_SEPARATOR_RE.find_iter(content) {
        if starts_new_item(&content[separator.end()..]) {
            parts.push(&content[last..separator.start()]);
            last = separator.end();
        }
    }

    if parts.is_empty() {
        return None;
    }
    parts.push(&content[last..]);

    Some(
        parts
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| format!("{ITEM_OPEN}{part}{ITEM_CLOSE}"))
            .collect(),
    )
}

fn starts_new_item(text: &str) -> bool {
    if text.starts_with("<strong>") {
        return true;
    }
    text.chars().next().is_some_and(|c| {
        c.is_ascii_uppercase() || ('Á'..='Ú').contains(&c) || ('á'..='ú').contains(&c)
    })
}
