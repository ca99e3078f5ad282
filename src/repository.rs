//! Repository identifier extraction.

use std::fmt;
use url::Url;

/// Suffix stripped from repository names (`repo.git` becomes `repo`).
const REPOSITORY_SUFFIX: &str = ".git";

/// Owner and name of a hosted repository.
///
/// Both fields are non-empty and the name never carries the `.git`
/// suffix. Construct through [`RepositoryReference::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryReference {
    owner: String,
    name: String,
}

impl RepositoryReference {
    /// Extracts owner and name from a repository location.
    ///
    /// Parses `location` as a URL first and takes the first two non-empty
    /// path segments. When that fails or yields fewer than two segments,
    /// falls back to splitting the raw string on `/` and taking the last
    /// two segments, which covers scheme-less inputs like
    /// `github.com/owner/repo` and bare `owner/repo` pairs.
    ///
    /// # Arguments
    ///
    /// * `location`: Repository URL or slash separated path
    ///
    /// # Returns
    ///
    /// Reference, or None if owner and name cannot both be determined
    pub fn parse(location: &str) -> Option<Self> {
        Self::from_url(location).or_else(|| Self::from_raw_segments(location))
    }

    /// Creates reference from already separated parts.
    ///
    /// Returns None if either part is empty after suffix stripping.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Option<Self> {
        let owner = owner.into();
        let name = strip_suffix(&name.into()).to_string();
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { owner, name })
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without `.git` suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn from_url(location: &str) -> Option<Self> {
        let url = Url::parse(location.trim()).ok()?;
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let name = segments.next()?;
        Self::new(owner, name)
    }

    fn from_raw_segments(location: &str) -> Option<Self> {
        let trimmed = location.trim().trim_end_matches('/');
        let mut segments = trimmed.rsplit('/');
        let name = segments.next()?;
        let owner = segments.next()?;
        Self::new(owner, name)
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn strip_suffix(name: &str) -> &str {
    name.strip_suffix(REPOSITORY_SUFFIX).unwrap_or(name)
}
