//! Runtime configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable holding the optional API token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Repositories collected by default.
pub const DEFAULT_REPOSITORIES: &[&str] = &[
    "https://github.com/Tiago-Daniel-Guerreiro/IpShared",
    "https://github.com/Tiago-Daniel-Guerreiro/AppDeQuiosque",
    "https://github.com/Tiago-Daniel-Guerreiro/SistemaHospitalar",
    "https://github.com/Tiago-Daniel-Guerreiro/tiago-daniel-guerreiro.github.io",
    "https://github.com/Tiago-Daniel-Guerreiro/Site-Manga",
    "https://github.com/Tiago-Daniel-Guerreiro/Site-Agendamentos",
    "https://github.com/Tiago-Daniel-Guerreiro/SistemaDeGestaoDeBiblioteca",
];

const DEFAULT_OUTPUT: &str = "data/github_projects.json";
const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
const DEFAULT_LINK_BASE: &str = "https://github.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Command line surface.
///
/// Takes no arguments: every run fetches all repositories, re-applies the
/// HTML repairs and overwrites the output file. Only `--help` and
/// `--version` are recognised.
#[derive(Debug, Clone, Parser)]
#[command(name = "repofolio", version, about, long_about = None)]
pub struct Cli {}

impl Cli {
    /// Parses command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

/// Settings for one collection run.
#[derive(Clone)]
pub struct Config {
    /// Repository locations, processed in order
    pub repositories: Vec<String>,
    /// JSON output file
    pub output: PathBuf,
    /// Metadata API host
    pub api_base: String,
    /// Raw content host
    pub raw_base: String,
    /// Web host used for record links
    pub link_base: String,
    /// Hard cutoff per request
    pub timeout: Duration,
    /// Pause between repositories
    pub pause: Duration,
    /// Optional API token
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repositories: DEFAULT_REPOSITORIES.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            link_base: DEFAULT_LINK_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            pause: DEFAULT_PAUSE,
            token: None,
        }
    }
}

impl Config {
    /// Builds default configuration with the token read from `GITHUB_TOKEN`.
    ///
    /// A missing or empty variable leaves the client unauthenticated.
    pub fn from_env() -> Self {
        Self::default().with_token(std::env::var(TOKEN_ENV).ok())
    }

    /// Sets API token, treating blank values as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if a host is not an absolute http(s) URL or the
    /// request timeout is zero.
    pub fn validate(&self) -> Result<()> {
        for (label, base) in [
            ("API", &self.api_base),
            ("raw content", &self.raw_base),
            ("link", &self.link_base),
        ] {
            match Url::parse(base) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => bail!("Invalid {} host: {}", label, base),
            }
        }

        if self.timeout.is_zero() {
            bail!("Request timeout must be greater than zero");
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("repositories", &self.repositories)
            .field("output", &self.output)
            .field("api_base", &self.api_base)
            .field("raw_base", &self.raw_base)
            .field("link_base", &self.link_base)
            .field("timeout", &self.timeout)
            .field("pause", &self.pause)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
