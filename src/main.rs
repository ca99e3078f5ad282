use anyhow::{Context, Result};
use repofolio::{Cli, Config, GithubClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "repofolio=info";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    Cli::parse();
    init_tracing();

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;

    if config.token.is_none() {
        info!("no API token configured, requests are unauthenticated");
    }

    let client = GithubClient::new(&config);
    let summary = repofolio::run(client, &config).context("Failed to build project catalog")?;

    info!(
        records = summary.records,
        changed = summary.changed,
        output = %summary.output.display(),
        "run complete"
    );

    Ok(())
}
