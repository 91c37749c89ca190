//! relnotes - resolve GitHub issue and contributor metadata for release notes.
//!
//! This binary wires the configuration crate to the GitHub client: it loads
//! the project's changelog config, reads `GITHUB_AUTH`, performs a single
//! lookup, and prints the result as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use relnotes_config::{Config, Repository, auth::token_from_env};
use relnotes_github::{ClientConfig, GitHubClient};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "relnotes", version, about)]
struct Args {
    /// Project root holding the changelog config and cache directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Repository in `owner/repo` form; overrides the config file.
    #[arg(long)]
    repo: Option<Repository>,

    /// Cache directory relative to the root; overrides the config file.
    #[arg(long, conflicts_with = "no_cache")]
    cache_dir: Option<PathBuf>,

    /// Disable response caching.
    #[arg(long)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Look up an issue or pull request by number.
    Issue { number: String },
    /// Look up a user by login.
    User { login: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = build_client(&args)?;

    let output = match &args.command {
        Command::Issue { number } => {
            serde_json::to_string_pretty(&client.get_issue(number).await?)?
        }
        Command::User { login } => serde_json::to_string_pretty(&client.get_user(login).await?)?,
    };
    println!("{output}");

    Ok(())
}

fn build_client(args: &Args) -> anyhow::Result<GitHubClient> {
    let config = effective_config(args)?;
    let repo = config.repository()?;

    debug!(%repo, cache_dir = ?config.cache_dir, "building GitHub client");
    let mut client_config = ClientConfig::new(repo.full_name(), &args.root);
    client_config.cache_dir = config.cache_dir;
    client_config.auth_token = token_from_env();

    Ok(GitHubClient::new(client_config)?)
}

/// Loads the config file under `--root` and applies the command-line
/// overrides on top of it.
///
/// The merged result is validated again, so flags are held to the same
/// rules as the file.
fn effective_config(args: &Args) -> anyhow::Result<Config> {
    let file = Config::load(&args.root)
        .with_context(|| format!("failed to load config from {}", args.root.display()))?;

    let config = Config {
        repo: args.repo.clone().or(file.repo),
        cache_dir: if args.no_cache {
            None
        } else {
            args.cache_dir.clone().or(file.cache_dir)
        },
    };
    config.validate()?;

    Ok(config)
}
