//! Capstan - winch your deployment secrets up to GitHub Actions.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use capstan::cli::output;
use capstan::cli::{execute, Cli};
use capstan::error::{ConfigError, Error};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("CAPSTAN_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("capstan=debug")
        } else {
            EnvFilter::new("capstan=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli).await {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingToken) => {
                Some("pass --token or export GITHUB_ACCESS_TOKEN")
            }
            Error::Config(ConfigError::MissingRepo) => {
                Some("pass --repo owner/repo or set repo in .capstan.toml")
            }
            Error::Config(ConfigError::MissingStage { .. }) => {
                Some("pass --stage or map the branch under [stages] in .capstan.toml")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
