//! Project catalog assembly.
//!
//! Drives the per repository sequence: metadata fetch, README fetch,
//! then split, clean, render and repair. Every stage is best effort; a
//! failure is logged and the record keeps whatever fields were filled
//! before it. Repositories are processed one at a time, in input order,
//! with a fixed pause between them.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use crate::client::RepositorySource;
use crate::config::Config;
use crate::error::{ProcessingError, SkipReason};
use crate::html::finalize_html;
use crate::markdown::{MarkdownRenderer, clean_body, split_title};
use crate::record::ProjectRecord;
use crate::repository::RepositoryReference;
use crate::store;

/// Title and HTML produced from one README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedReadme {
    pub title: Option<String>,
    pub html: String,
}

/// Outcome of a full collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records written
    pub records: usize,
    /// Records whose HTML changed during re-normalization
    pub changed: usize,
    /// Output file
    pub output: PathBuf,
}

/// Runs README text through split, clean, render and repair.
///
/// # Arguments
///
/// * `renderer`: Markdown renderer
/// * `readme`: Raw README text
/// * `repository`: Repository name, selects repository specific repairs
///
/// # Errors
///
/// Returns error if Markdown rendering fails
pub fn process_readme(
    renderer: &MarkdownRenderer<'_>,
    readme: &str,
    repository: &str,
) -> Result<ProcessedReadme, ProcessingError> {
    let split = split_title(readme);
    let body = clean_body(&split.body);
    let html = renderer.render(&body)?;

    Ok(ProcessedReadme {
        title: split.title,
        html: finalize_html(Some(&html), repository),
    })
}

/// Re-applies the HTML repairs to stored records without fetching.
///
/// Records without `description_html` are left alone. A record is only
/// rewritten when the repaired HTML differs from the stored value.
///
/// # Returns
///
/// Number of records whose HTML changed
pub fn renormalize(records: &mut [ProjectRecord]) -> usize {
    let mut changed = 0;

    for record in records.iter_mut() {
        let Some(current) = record.description_html.as_deref() else {
            continue;
        };

        let repaired = finalize_html(Some(current), &record.repo);
        if repaired != current {
            record.description_html = Some(repaired);
            changed += 1;
        }
    }

    info!(changed, total = records.len(), "re-normalization applied");
    changed
}

/// Builds project records from a repository source.
pub struct CatalogBuilder<S> {
    source: S,
    renderer: MarkdownRenderer<'static>,
    link_base: String,
    pause: Duration,
}

impl<S: RepositorySource> CatalogBuilder<S> {
    /// Creates builder using the link host and pause from configuration.
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            renderer: MarkdownRenderer::new(),
            link_base: config.link_base.clone(),
            pause: config.pause,
        }
    }

    /// Overrides the pause between repositories.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Parses a location and processes the repository it names.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::MalformedReference`] if owner and name cannot
    /// be extracted; no record exists for such entries.
    pub fn process_location(&self, location: &str) -> Result<ProjectRecord, SkipReason> {
        let reference = RepositoryReference::parse(location)
            .ok_or_else(|| SkipReason::MalformedReference(location.to_string()))?;
        Ok(self.process_repository(&reference))
    }

    /// Builds the record for one repository.
    ///
    /// Metadata failure leaves `description` absent and the default branch
    /// unknown. README failure leaves `title` and `description_html`
    /// absent. A processing failure is logged and the record is returned
    /// with the fields set so far.
    pub fn process_repository(&self, reference: &RepositoryReference) -> ProjectRecord {
        info!(repository = %reference, "processing repository");
        let mut record = ProjectRecord::new(reference, &self.link_base);

        let default_branch = match self.source.metadata(reference) {
            Ok(metadata) => {
                record.description = Some(metadata.description.unwrap_or_default());
                metadata.default_branch
            }
            Err(e) => {
                warn!(repository = %reference, error = %e, "metadata fetch failed, continuing without it");
                None
            }
        };

        let readme = match self.source.readme(reference, default_branch.as_deref()) {
            Ok(readme) => readme,
            Err(e) => {
                warn!(repository = %reference, error = %e, "README not available");
                return record;
            }
        };

        match process_readme(&self.renderer, &readme, reference.name()) {
            Ok(processed) => {
                record.title = Some(processed.title.unwrap_or_default());
                record.description_html = Some(processed.html);
            }
            Err(e) => warn!(repository = %reference, error = %e, "README processing failed"),
        }

        record
    }

    /// Processes every location in order.
    ///
    /// Malformed locations are logged and skipped. Sleeps for the
    /// configured pause between consecutive entries.
    pub fn fetch_all<I>(&self, locations: I) -> Vec<ProjectRecord>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut records = Vec::new();

        for (index, location) in locations.into_iter().enumerate() {
            if index > 0 && !self.pause.is_zero() {
                thread::sleep(self.pause);
            }

            match self.process_location(location.as_ref()) {
                Ok(record) => records.push(record),
                Err(reason) => warn!(%reason, "skipping repository"),
            }
        }

        records
    }
}

/// Fetches all configured repositories, re-normalizes and persists.
///
/// # Errors
///
/// Returns error only if the output file cannot be written
pub fn run<S: RepositorySource>(source: S, config: &Config) -> Result<RunSummary> {
    let builder = CatalogBuilder::new(source, config);

    info!(count = config.repositories.len(), "fetching repository data");
    let mut records = builder.fetch_all(&config.repositories);
    let changed = renormalize(&mut records);

    store::save(&config.output, &records).context("Failed to persist project records")?;

    Ok(RunSummary {
        records: records.len(),
        changed,
        output: config.output.clone(),
    })
}
