//! README Markdown handling.
//!
//! Splits the title off raw README text, cleans the remaining body and
//! renders it to HTML with comrak. The HTML repair passes live in
//! [`crate::html`].

pub mod cleaner;
mod renderer;
mod splitter;

pub use cleaner::clean_body;
pub use renderer::{
    MarkdownRenderer, PREPARE_STEPS, prepare, separate_headings_from_lists, separate_list_items,
    unbold_bracket_labels,
};
pub use splitter::{SplitReadme, is_noise_line, split_title};
