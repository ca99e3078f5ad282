//! Project record persisted for the portfolio site.

use serde::{Deserialize, Serialize};

use crate::repository::RepositoryReference;

/// One repository entry in the persisted output.
///
/// Optional fields are omitted from JSON when absent. `description` is
/// present only when metadata was fetched; `title` and
/// `description_html` only when a README was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub repo: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
}

impl ProjectRecord {
    /// Creates record with name and web link, other fields absent.
    ///
    /// # Arguments
    ///
    /// * `reference`: Repository owner and name
    /// * `link_base`: Web host the link points at (`https://github.com`)
    pub fn new(reference: &RepositoryReference, link_base: &str) -> Self {
        Self {
            repo: reference.name().to_string(),
            link: format!(
                "{}/{}/{}",
                link_base.trim_end_matches('/'),
                reference.owner(),
                reference.name()
            ),
            description: None,
            title: None,
            description_html: None,
        }
    }
}
