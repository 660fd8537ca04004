//! Producer CLI - list issues and publish releases on GitHub or GitLab.

mod api;
mod git;

use anyhow::Context;
use clap::{Parser, Subcommand};
use producer_core::config::Config;
use producer_core::Provider;
use tracing_subscriber::EnvFilter;

use crate::api::ApiProvider;
use crate::git::GitRepo;

#[derive(Parser)]
#[command(name = "producer")]
#[command(author, version, about = "Producer - release and issue helper for GitHub and GitLab", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Remote origin to use instead of the current repository's `origin`
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List open issues
    Issues,

    /// Publish a release for the current branch
    Release {
        /// Version to tag, e.g. 1.2.0
        version: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (tokens hidden)
    Show,

    /// Print a single value, e.g. `github.username`
    Get { key: String },

    /// Set a single value, e.g. `gitlab.token glpat-xxx`
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Issues) => {
            let config = Config::load()?.apply_env();
            let origin = match cli.origin {
                Some(origin) => origin,
                None => current_repo(&config)?.origin()?,
            };
            let provider = ApiProvider::from_origin(&origin, &config)?;

            let issues = provider.issues().await?;
            if issues.is_empty() {
                println!("No open issues.");
            }
            for issue in issues {
                println!("#{}  {}", issue.number, issue.title);
                println!("    {}", issue.url);
            }
        }
        Some(Commands::Release { version }) => {
            let config = Config::load()?.apply_env();
            let repo = current_repo(&config)?;
            let origin = match cli.origin {
                Some(origin) => origin,
                None => repo.origin()?,
            };
            let provider = ApiProvider::from_origin(&origin, &config)?;

            tracing::info!(
                provider = provider.name(),
                repo = %provider.repo_name(),
                version = %version,
                "Releasing"
            );
            provider
                .release(&repo, &version)
                .await
                .with_context(|| format!("Release {} failed", version))?;
            println!("Released {} on {} ({})", version, provider.repo_name(), provider.name());
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                let config = Config::load()?;
                println!("# {}", Config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&config.redacted())?);
            }
            ConfigCommands::Get { key } => {
                let config = Config::load()?;
                match config.get(&key)? {
                    Some(value) => println!("{}", value),
                    None => println!("{} is not set", key),
                }
            }
            ConfigCommands::Set { key, value } => {
                let mut config = Config::load()?;
                config.set(&key, &value)?;
                config.save()?;
                println!("Set {}", key);
            }
        },
        None => {
            println!("Producer - release and issue helper for GitHub and GitLab");
            println!("Run with --help for usage information");
        }
    }

    Ok(())
}

fn current_repo(config: &Config) -> anyhow::Result<GitRepo> {
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    Ok(GitRepo::open(cwd, config.project.changelog.clone())?)
}
