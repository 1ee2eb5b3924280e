//! Portfolio CLI - browse an account's pinned and recent GitHub projects
//! and the weather widget from the terminal.

mod commands;
mod config;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::commands::output::OutputFormat;
use crate::commands::projects::ProjectsArgs;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(version)]
#[command(about = "Pinned and recent GitHub projects, paged for a portfolio site")]
#[command(
    long_about = "Portfolio merges an account's pinned repositories with its most recently \
updated ones, drops archived repositories and duplicates, and shows the result one page \
at a time with a compact page-number row. It also reports current weather conditions \
for the site's sidebar widget."
)]
#[command(after_long_help = r#"EXAMPLES
    List the first page of projects:
        $ portfolio projects

    Show page 3 with eight projects per page:
        $ portfolio projects --page 3 --page-size 8

    List another account as JSON:
        $ portfolio projects --login octocat --output json

    Current weather for the default location:
        $ portfolio weather

    Generate shell completions:
        $ portfolio completions bash > ~/.local/share/bash-completion/completions/portfolio

CONFIGURATION
    Portfolio reads configuration from:
      1. ~/.config/portfolio/config.toml (or $XDG_CONFIG_HOME/portfolio/config.toml)
      2. ./portfolio.toml
      3. Environment variables (PORTFOLIO_* prefix, e.g., PORTFOLIO_GITHUB_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    PORTFOLIO_GITHUB_TOKEN    GitHub personal access token
    PORTFOLIO_GITHUB_LOGIN    Account whose repositories are listed
    PORTFOLIO_WEATHER_KEY     weatherapi.com API key
    PORTFOLIO_WEATHER_LOCATION
                              Default weather location
    GITHUB_API_KEY            Fallback GitHub token
    WEATHER_API_KEY           Fallback weather API key
    RUST_LOG                  Log filter (logs are written when stdout is not a terminal)
"#)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pinned and recently updated repositories, one page at a time
    Projects(ProjectsArgs),

    /// Show current weather conditions
    Weather {
        /// Location to look up (default from config)
        location: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Write the script into this directory instead of stdout
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Generate man pages
    Man {
        /// Directory to write man pages to (prints the main page to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Structured logging only when stdout is not a TTY, unless --verbose
    if cli.verbose || !Term::stdout().is_term() {
        let env_filter = if cli.verbose {
            EnvFilter::new("portfolio=debug,portfolio_cli=debug")
        } else {
            match EnvFilter::try_from_default_env() {
                Ok(filter) => filter,
                Err(_) => EnvFilter::new("portfolio=info,portfolio_cli=info"),
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = config::Config::load();

    let cancel = CancellationToken::new();
    shutdown::setup_shutdown_handler(cancel.clone());

    match cli.command {
        Commands::Projects(args) => {
            commands::projects::handle_projects(args, &config, &cancel).await?;
        }
        Commands::Weather { location, output } => {
            commands::weather::handle_weather(location, output, &config).await?;
        }
        Commands::Completions { shell, dir } => {
            commands::meta::handle_completions(shell, dir)?;
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output)?;
        }
    }

    Ok(())
}
