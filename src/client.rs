//! Remote repository metadata and README retrieval.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::FetchError;
use crate::repository::RepositoryReference;

const API_JSON: &str = "application/vnd.github.v3+json";
const API_RAW: &str = "application/vnd.github.v3.raw";

/// Branches tried after the default branch when fetching raw content.
pub const FALLBACK_BRANCHES: &[&str] = &["main", "master"];

/// README file names tried on each branch, in order.
pub const README_FILENAMES: &[&str] = &[
    "README.md",
    "README.MD",
    "Readme.md",
    "readme.md",
    "README.markdown",
    "README.rst",
    "README.txt",
    "README",
];

/// Repository fields used from the metadata endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryMetadata {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Source of repository metadata and README text.
pub trait RepositorySource {
    /// Fetches repository metadata.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, non-200 status or undecodable body
    fn metadata(&self, repository: &RepositoryReference)
    -> Result<RepositoryMetadata, FetchError>;

    /// Fetches raw README text.
    ///
    /// # Arguments
    ///
    /// * `repository`: Repository to read
    /// * `default_branch`: Branch tried first for raw content, if known
    ///
    /// # Errors
    ///
    /// Returns error when no strategy produced a non-empty README
    fn readme(
        &self,
        repository: &RepositoryReference,
        default_branch: Option<&str>,
    ) -> Result<String, FetchError>;
}

impl<T: RepositorySource + ?Sized> RepositorySource for &T {
    fn metadata(
        &self,
        repository: &RepositoryReference,
    ) -> Result<RepositoryMetadata, FetchError> {
        (**self).metadata(repository)
    }

    fn readme(
        &self,
        repository: &RepositoryReference,
        default_branch: Option<&str>,
    ) -> Result<String, FetchError> {
        (**self).readme(repository, default_branch)
    }
}

/// Returns branch candidates: default branch first, then fallbacks.
pub fn branch_candidates(default_branch: Option<&str>) -> Vec<&str> {
    let mut branches: Vec<&str> = default_branch
        .filter(|b| !b.is_empty())
        .into_iter()
        .collect();
    for &fallback in FALLBACK_BRANCHES {
        if !branches.contains(&fallback) {
            branches.push(fallback);
        }
    }
    branches
}

/// Builds raw content URLs for every branch and file name combination.
///
/// Ordered branch-major: all file names for the first branch come before
/// any file name on the next branch.
pub fn raw_readme_urls(
    raw_base: &str,
    repository: &RepositoryReference,
    default_branch: Option<&str>,
) -> Vec<String> {
    let base = raw_base.trim_end_matches('/');
    branch_candidates(default_branch)
        .into_iter()
        .flat_map(|branch| {
            README_FILENAMES.iter().map(move |file| {
                format!(
                    "{}/{}/{}/{}/{}",
                    base,
                    repository.owner(),
                    repository.name(),
                    branch,
                    file
                )
            })
        })
        .collect()
}

/// HTTP client for a GitHub style hosting API.
///
/// One agent is shared by every request so connections are reused. The
/// token, when configured, is sent to API endpoints only, never to the
/// raw content host.
pub struct GithubClient {
    agent: ureq::Agent,
    api_base: String,
    raw_base: String,
    token: Option<String>,
}

impl GithubClient {
    /// Creates client from configuration hosts, timeout and token.
    pub fn new(config: &Config) -> Self {
        Self::with_hosts(
            &config.api_base,
            &config.raw_base,
            config.timeout,
            config.token.clone(),
        )
    }

    /// Creates client against explicit hosts.
    pub fn with_hosts(
        api_base: &str,
        raw_base: &str,
        timeout: Duration,
        token: Option<String>,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("repofolio/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn repository_url(&self, repository: &RepositoryReference) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base,
            repository.owner(),
            repository.name()
        )
    }

    fn api_request(&self, url: &str, accept: &str) -> ureq::Request {
        let request = self.agent.get(url).set("Accept", accept);
        match &self.token {
            Some(token) => request.set("Authorization", &format!("token {}", token)),
            None => request,
        }
    }

    fn call(request: ureq::Request) -> Result<ureq::Response, FetchError> {
        let response = request.call()?;
        match response.status() {
            200 => Ok(response),
            status => Err(FetchError::Status(status)),
        }
    }

    fn read_text(request: ureq::Request) -> Result<String, FetchError> {
        let body = Self::call(request)?
            .into_string()
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody);
        }
        Ok(body)
    }

    fn readme_from_api(&self, repository: &RepositoryReference) -> Result<String, FetchError> {
        let url = format!("{}/readme", self.repository_url(repository));
        Self::read_text(self.api_request(&url, API_RAW))
    }

    fn readme_from_raw(
        &self,
        repository: &RepositoryReference,
        default_branch: Option<&str>,
    ) -> Result<String, FetchError> {
        let urls = raw_readme_urls(&self.raw_base, repository, default_branch);
        let attempts = urls.len();

        for url in urls {
            match Self::read_text(self.agent.get(&url)) {
                Ok(text) => {
                    debug!(%url, "README found on raw host");
                    return Ok(text);
                }
                Err(e) => debug!(%url, error = %e, "raw README candidate failed"),
            }
        }

        Err(FetchError::NotFound { attempts })
    }
}

impl RepositorySource for GithubClient {
    fn metadata(
        &self,
        repository: &RepositoryReference,
    ) -> Result<RepositoryMetadata, FetchError> {
        let url = self.repository_url(repository);
        Self::call(self.api_request(&url, API_JSON))?
            .into_json()
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn readme(
        &self,
        repository: &RepositoryReference,
        default_branch: Option<&str>,
    ) -> Result<String, FetchError> {
        match self.readme_from_api(repository) {
            Ok(text) => return Ok(text),
            Err(e) => debug!(%repository, error = %e, "README endpoint failed, trying raw host"),
        }
        self.readme_from_raw(repository, default_branch)
    }
}
