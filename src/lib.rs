//! Repository README collector for static portfolio sites.

mod catalog;
mod client;
mod config;
mod error;
pub mod html;
pub mod markdown;
pub mod pipeline;
mod record;
mod repository;
pub mod store;
mod util;

pub use catalog::{
    CatalogBuilder, ProcessedReadme, RunSummary, process_readme, renormalize, run,
};
pub use client::{
    FALLBACK_BRANCHES, GithubClient, README_FILENAMES, RepositoryMetadata, RepositorySource,
    branch_candidates, raw_readme_urls,
};
pub use config::{Cli, Config, DEFAULT_REPOSITORIES, TOKEN_ENV};
pub use error::{FetchError, ProcessingError, SkipReason};
pub use html::finalize_html;
pub use markdown::{MarkdownRenderer, SplitReadme, clean_body, split_title};
pub use record::ProjectRecord;
pub use repository::RepositoryReference;
pub use util::{collapse_blank_lines, html_escape};
