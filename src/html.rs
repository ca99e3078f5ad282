//! Structural repair of rendered README HTML.
//!
//! The post-processor is an ordered list of named passes, each consuming
//! the previous pass's output:
//!
//! 1. badge and status image removal
//! 2. legacy heading artifact repair
//! 3. site link removal (selected repositories only)
//! 4. list repair for paragraphs holding list syntax
//! 5. paragraph flattening inside list items
//! 6. run-together list item splitting
//! 7. residual cleanup (demo notice, empty lists, blank lines)
//!
//! The same passes run over freshly rendered HTML and over HTML stored by
//! an earlier run, so every pass must tolerate its own output.

mod lists;

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::pipeline::{Step, run_steps};
use crate::util::{collapse_blank_lines, html_escape};

pub use lists::{flatten_list_paragraphs, repair_lists, split_run_together_items};

/// Control character that prefixed headings in HTML stored by older runs.
const HEADING_MARKER: char = '\u{1}';

/// Repositories whose README ends with a link back to the portfolio site.
pub const SITE_LINK_REPOSITORIES: &[&str] = &["tiago-daniel-guerreiro.github.io", "Site-Manga"];

const SITE_LINK_STEP: &str = "strip_visit_links";

// Badge signatures: .NET Framework alt text, shields.io source, "badge" alt text.
const BADGE_IMAGE: &str =
    r#"<img[^>]*(?:alt="[^"]*\.NET Framework"|src="[^"]*shields\.io[^"]*"|alt="[^"]*badge[^"]*")[^>]*>"#;

// Badge image, optionally wrapped in a link holding nothing else.
static BADGE: LazyLock<String> =
    LazyLock::new(|| format!(r"(?:<a\s[^>]*>\s*{BADGE_IMAGE}\s*</a>|{BADGE_IMAGE})"));

static WRAPPED_BADGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)<p(?:\s[^>]*)?>\s*{}\s*</p>", *BADGE))
        .expect("WRAPPED_BADGE_RE should compile")
});
static BARE_BADGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", *BADGE)).expect("BARE_BADGE_RE should compile")
});
static EMPTY_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<p(?:\s[^>]*)?>(?:\s|<br\s*/?>)*</p>").expect("EMPTY_PARAGRAPH_RE should compile")
});
static MARKER_HEADING_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\x01([^<]+?)<br\s*/?\s*>").expect("MARKER_HEADING_BREAK_RE should compile")
});
static MARKER_HEADING_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\x01([^<]+?)</p>").expect("MARKER_HEADING_PARAGRAPH_RE should compile")
});
static VISIT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p><strong>Visite?:</strong>\s*<a[^>]*>.*?</a></p>")
        .expect("VISIT_LINK_RE should compile")
});
static DEMO_NOTICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<p(?:\s[^>]*)?>[^<]*(?:Uma versão de demonstração está disponível online em|A demo version is available online at).*?</p>",
    )
    .expect("DEMO_NOTICE_RE should compile")
});
static EMPTY_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<ul(?:\s[^>]*)?>\s*</ul>|<ol(?:\s[^>]*)?>\s*</ol>").expect("EMPTY_LIST_RE should compile")
});

/// Repair passes in application order.
pub const HTML_STEPS: &[Step] = &[
    Step::new("strip_badges", strip_badges),
    Step::new("repair_marker_headings", repair_marker_headings),
    Step::new(SITE_LINK_STEP, strip_visit_links),
    Step::new("repair_lists", repair_lists),
    Step::new("flatten_list_paragraphs", flatten_list_paragraphs),
    Step::new("split_run_together_items", split_run_together_items),
    Step::new("strip_demo_notice", strip_demo_notice),
    Step::new("drop_empty_lists", drop_empty_lists),
    Step::new("collapse_blank_lines", collapse_blank_lines),
];

/// Runs every repair pass over rendered README HTML.
///
/// Missing or empty input yields an empty string. The site link pass only
/// runs for repositories listed in [`SITE_LINK_REPOSITORIES`].
///
/// # Arguments
///
/// * `html`: Rendered or previously stored HTML
/// * `repository`: Repository name, selects repository specific passes
///
/// # Returns
///
/// Repaired HTML, trimmed
pub fn finalize_html(html: Option<&str>, repository: &str) -> String {
    let Some(html) = html.filter(|html| !html.is_empty()) else {
        return String::new();
    };

    let site_specific = SITE_LINK_REPOSITORIES.contains(&repository);
    let steps = HTML_STEPS
        .iter()
        .filter(|step| site_specific || step.name() != SITE_LINK_STEP);

    run_steps(steps, html).trim().to_string()
}

/// Removes badge and status images, with any link wrapping only the
/// badge, then any paragraph left empty.
pub fn strip_badges(html: &str) -> String {
    let html = WRAPPED_BADGE_RE.replace_all(html, "");
    let html = BARE_BADGE_RE.replace_all(&html, "");
    EMPTY_PARAGRAPH_RE.replace_all(&html, "").trim().to_string()
}

/// Rewrites marker prefixed paragraphs as level two headings.
///
/// `<p>\u{1}Title<br />rest` becomes `<h2>Title</h2><p>rest` and
/// `<p>\u{1}Title</p>` becomes `<h2>Title</h2>`. Stray markers are removed.
pub fn repair_marker_headings(html: &str) -> String {
    let heading = |caps: &Captures| format!("<h2>{}</h2>", html_escape(caps[1].trim()));

    let html = MARKER_HEADING_BREAK_RE.replace_all(html, |caps: &Captures| {
        format!("{}<p>", heading(caps))
    });
    let html = MARKER_HEADING_PARAGRAPH_RE.replace_all(&html, heading);
    html.replace(HEADING_MARKER, "")
}

/// Removes the `Visit:` paragraph linking back to the portfolio site.
pub fn strip_visit_links(html: &str) -> String {
    VISIT_LINK_RE.replace_all(html, "").into_owned()
}

/// Removes the paragraph announcing an online demo.
pub fn strip_demo_notice(html: &str) -> String {
    DEMO_NOTICE_RE.replace_all(html, "").into_owned()
}

/// Removes list containers without items.
pub fn drop_empty_lists(html: &str) -> String {
    EMPTY_LIST_RE.replace_all(html, "").into_owned()
}
