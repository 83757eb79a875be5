//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod activity;
pub mod comment;
pub mod config;
pub mod parse;
pub mod react;
pub mod thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dt_core::config::Config;
use dt_core::thread::ThreadManager;
use dt_storage::FileSystemStorage;
use std::path::PathBuf;
use tracing::debug;

/// Project-local configuration file, relative to the working directory
pub const LOCAL_CONFIG_PATH: &str = ".datathread/config.toml";

/// datathread - threaded comments on databases, tables, rows and values
#[derive(Debug, Parser)]
#[command(name = "datathread")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory thread files are stored in
    #[arg(long, global = true, env = "DATATHREAD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse comment text into tokens and render nodes
    Parse(parse::ParseArgs),

    /// Open, show, resolve and list threads
    #[command(subcommand)]
    Thread(thread::ThreadCommand),

    /// Add or edit comments
    #[command(subcommand)]
    Comment(comment::CommentCommand),

    /// Add or remove reactions
    #[command(subcommand)]
    React(react::ReactCommand),

    /// Search recent comments
    Activity(activity::ActivityArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Settings resolved from global flags and the configuration file
pub struct AppContext {
    /// Effective configuration
    pub config: Config,
    /// Where the configuration was (or would be) loaded from
    pub config_path: PathBuf,
    /// Data directory override from the command line
    data_dir: Option<PathBuf>,
}

impl AppContext {
    /// Resolve configuration: `--config`, then the project-local file, then defaults
    pub fn load(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let (config, config_path) = match config_path {
            Some(path) => {
                let config = Config::load(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                (config, path)
            }
            None => {
                let path = PathBuf::from(LOCAL_CONFIG_PATH);
                let config = Config::load_or_default(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                (config, path)
            }
        };
        debug!(
            "Using config {} ({})",
            config_path.display(),
            if config_path.exists() { "file" } else { "defaults" }
        );

        Ok(Self {
            config,
            config_path,
            data_dir,
        })
    }

    /// Data directory: command line, then configuration, then the platform default
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| self.config.storage.data_dir.clone())
            .unwrap_or_else(dt_storage::default_data_dir)
    }

    /// Context with default configuration and an explicit data directory
    #[cfg(test)]
    pub fn for_tests(data_dir: Option<PathBuf>) -> Self {
        Self {
            config: Config::default(),
            config_path: PathBuf::from(LOCAL_CONFIG_PATH),
            data_dir,
        }
    }

    /// Open the thread store
    pub fn manager(&self) -> Result<ThreadManager> {
        let data_dir = self.data_dir();
        debug!("Opening thread store at {}", data_dir.display());
        let storage = FileSystemStorage::new(&data_dir)
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
        Ok(ThreadManager::new(storage).with_config(&self.config.comments))
    }
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = AppContext::load(cli.config, cli.data_dir)?;

    match cli.command {
        Commands::Parse(args) => parse::execute(&ctx, args),
        Commands::Thread(cmd) => thread::execute(&ctx, cmd),
        Commands::Comment(cmd) => comment::execute(&ctx, cmd),
        Commands::React(cmd) => react::execute(&ctx, cmd),
        Commands::Activity(args) => activity::execute(&ctx, args),
        Commands::Config(cmd) => config::execute(&ctx, cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Format a timestamp as a short relative age
pub fn relative_age(at: chrono::DateTime<chrono::Utc>) -> String {
    let minutes = chrono::Utc::now().signed_duration_since(at).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_relative_age() {
        let now = chrono::Utc::now();
        assert_eq!(relative_age(now), "just now");
        assert_eq!(relative_age(now - chrono::Duration::minutes(5)), "5m ago");
        assert_eq!(relative_age(now - chrono::Duration::hours(3)), "3h ago");
        assert_eq!(relative_age(now - chrono::Duration::days(2)), "2d ago");
    }

    #[test]
    fn test_data_dir_precedence() {
        let mut ctx = AppContext::for_tests(None);
        ctx.config.storage.data_dir = Some(PathBuf::from("/from/config"));
        assert_eq!(ctx.data_dir(), PathBuf::from("/from/config"));

        ctx.data_dir = Some(PathBuf::from("/from/flag"));
        assert_eq!(ctx.data_dir(), PathBuf::from("/from/flag"));
    }
}
