//! Shared test utilities for integration tests.
//!
//! Provides an in-memory repository source and helpers for driving the
//! blocking HTTP client against a `wiremock` server.

#![allow(dead_code)]

use anyhow::Result;
use repofolio::{FetchError, RepositoryMetadata, RepositoryReference, RepositorySource};
use std::cell::RefCell;
use std::collections::HashMap;
use wiremock::{MockServer, Request};

/// In-memory repository source keyed by `owner/name`.
#[derive(Default)]
pub struct FakeSource {
    metadata: HashMap<String, RepositoryMetadata>,
    readmes: HashMap<String, String>,
    readme_calls: RefCell<Vec<(String, Option<String>)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds metadata answer for a repository.
    pub fn with_metadata(
        mut self,
        repository: &str,
        description: Option<&str>,
        default_branch: Option<&str>,
    ) -> Self {
        self.metadata.insert(
            repository.to_string(),
            RepositoryMetadata {
                description: description.map(String::from),
                default_branch: default_branch.map(String::from),
            },
        );
        self
    }

    /// Adds README answer for a repository.
    pub fn with_readme(mut self, repository: &str, readme: &str) -> Self {
        self.readmes
            .insert(repository.to_string(), readme.to_string());
        self
    }

    /// README requests received, with the branch hint passed.
    pub fn readme_calls(&self) -> Vec<(String, Option<String>)> {
        self.readme_calls.borrow().clone()
    }
}

impl RepositorySource for FakeSource {
    fn metadata(
        &self,
        repository: &RepositoryReference,
    ) -> Result<RepositoryMetadata, FetchError> {
        self.metadata
            .get(&repository.to_string())
            .cloned()
            .ok_or(FetchError::Status(404))
    }

    fn readme(
        &self,
        repository: &RepositoryReference,
        default_branch: Option<&str>,
    ) -> Result<String, FetchError> {
        self.readme_calls
            .borrow_mut()
            .push((repository.to_string(), default_branch.map(String::from)));
        self.readmes
            .get(&repository.to_string())
            .cloned()
            .ok_or(FetchError::NotFound { attempts: 0 })
    }
}

/// Runs a blocking client call off the async test runtime.
///
/// # Errors
///
/// Returns error if the blocking task panics
pub async fn blocking<T, F>(call: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(call).await?)
}

/// Requests received by the mock server, in arrival order.
pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// Paths of the requests received by the mock server.
pub async fn received_paths(server: &MockServer) -> Vec<String> {
    received(server)
        .await
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

/// Header value of a received request.
pub fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}
