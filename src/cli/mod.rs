//! Command-line interface.

pub mod connect;
pub mod cred;
pub mod output;
pub mod secrets;
pub mod write;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::ProjectConfig;
use crate::core::constants;
use crate::core::github::{GitHubClient, RepoPath};
use crate::core::gitinfo;
use crate::core::publish::Publisher;
use crate::error::{ConfigError, Result};

/// Capstan - winch your deployment secrets up to GitHub Actions.
#[derive(Parser)]
#[command(
    name = "capstan",
    about = "Publish encrypted secrets to a repository's GitHub Actions secret store",
    version
)]
pub struct Cli {
    /// GitHub access token
    #[arg(
        short,
        long,
        global = true,
        env = constants::TOKEN_ENV,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// GitHub repository as "owner/repo" (default: derived from the origin remote)
    #[arg(short, long, global = true)]
    pub repo: Option<String>,

    /// Deployment stage, e.g. dev, staging, prod (default: mapped from the current branch)
    #[arg(short, long, global = true)]
    pub stage: Option<String>,

    /// Prefix secret names with "{stage}{separator}"
    #[arg(short = 'w', long, global = true)]
    pub prefix_with_stage: bool,

    /// Separator between the stage prefix and the secret name
    #[arg(short = 'e', long, global = true)]
    pub prefix_separator: Option<String>,

    /// GitHub API base URL
    #[arg(
        long,
        global = true,
        env = constants::API_URL_ENV,
        default_value = constants::DEFAULT_API_URL
    )]
    pub api_url: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Publish every entry of the stage's config file
    Write {
        /// Directory holding the stage config files
        #[arg(short, long)]
        config_path: Option<PathBuf>,

        /// Config file name pattern; {stage} is replaced by the stage
        #[arg(short = 'f', long)]
        config_file_pattern: Option<String>,
    },

    /// Publish a single secret
    WriteOne {
        /// Secret name
        name: String,
        /// Plaintext secret value
        value: String,
    },

    /// Publish AWS credentials from a local profile
    Cred {
        /// Profile name in the AWS credentials file
        #[arg(short, long)]
        profile: String,
    },

    /// List the repository's secrets
    List,

    /// Show one secret's metadata
    Get {
        /// Secret name
        name: String,
    },

    /// Delete a secret
    Delete {
        /// Secret name
        name: String,
    },

    /// Check connectivity and authentication
    Connect,
}

/// Fully resolved invocation settings: flags first, then `.capstan.toml`,
/// then defaults derived from the working copy.
pub struct Settings {
    pub token: String,
    pub repo: RepoPath,
    pub api_url: String,
    pub prefix: String,
    pub stage: Option<String>,
    /// Resolved stage config file; set only for the write command.
    pub config_file: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let project = ProjectConfig::load()?;

        let token = cli.token.clone().ok_or(ConfigError::MissingToken)?;

        let repo = cli
            .repo
            .clone()
            .or_else(|| project.capstan.repo.clone())
            .or_else(gitinfo::origin_repo)
            .ok_or(ConfigError::MissingRepo)?;
        let repo: RepoPath = repo.parse()?;

        let prefix_with_stage =
            cli.prefix_with_stage || project.capstan.prefix_with_stage.unwrap_or(false);

        // The write command needs a config file; its location may depend on
        // the stage.
        let config_file = match &cli.command {
            Command::Write {
                config_path,
                config_file_pattern,
            } => {
                let dir = config_path
                    .clone()
                    .or_else(|| project.capstan.config_path.clone())
                    .unwrap_or_else(|| PathBuf::from("."));
                let pattern = config_file_pattern
                    .clone()
                    .or_else(|| project.capstan.config_file_pattern.clone())
                    .unwrap_or_else(|| constants::DEFAULT_CONFIG_FILE_PATTERN.to_string());
                Some((dir, pattern))
            }
            _ => None,
        };

        // The stage is resolved lazily: only prefixing and {stage} file
        // patterns need one.
        let stage_needed = prefix_with_stage
            || config_file
                .as_ref()
                .is_some_and(|(_, pattern)| pattern.contains("{stage}"));

        let stage = match &cli.stage {
            Some(stage) => Some(stage.clone()),
            None if stage_needed => {
                let branch = gitinfo::current_branch()?;
                let stage = project
                    .stage_for(&branch)
                    .ok_or_else(|| ConfigError::MissingStage { branch })?;
                Some(stage.to_string())
            }
            None => None,
        };

        let prefix = match (&stage, prefix_with_stage) {
            (Some(stage), true) => {
                let separator = cli
                    .prefix_separator
                    .clone()
                    .or_else(|| project.capstan.prefix_separator.clone())
                    .unwrap_or_else(|| constants::DEFAULT_PREFIX_SEPARATOR.to_string());
                format!("{stage}{separator}")
            }
            _ => String::new(),
        };

        let config_file = config_file.map(|(dir, pattern)| {
            let name = match &stage {
                Some(stage) => pattern.replace("{stage}", stage),
                None => pattern,
            };
            dir.join(name)
        });

        Ok(Self {
            token,
            repo,
            api_url: cli.api_url.clone(),
            prefix,
            stage,
            config_file,
        })
    }
}

/// Execute a command.
pub async fn execute(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(&cli)?;

    let client = GitHubClient::new(&settings.api_url, &settings.token, settings.repo.clone())?;
    let publisher = Publisher::new(client, settings.prefix.clone());

    match &cli.command {
        Command::Write { .. } => write::execute(&publisher, &settings).await,
        Command::WriteOne { name, value } => write::one(&publisher, name, value).await,
        Command::Cred { profile } => cred::execute(&publisher, profile).await,
        Command::List => secrets::list(&publisher).await,
        Command::Get { name } => secrets::get(&publisher, name).await,
        Command::Delete { name } => secrets::delete(&publisher, name).await,
        Command::Connect => connect::execute(&publisher).await,
    }
}
