//! Config command
//!
//! Manage datathread configuration.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dt_core::config::Config;

use super::AppContext;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file and data directory paths
    Path,
}

/// Execute the config command
pub fn execute(ctx: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(ctx, json),
        ConfigCommand::Init { force } => init_config(ctx, force),
        ConfigCommand::Path => show_paths(ctx),
    }
}

fn show_config(ctx: &AppContext, as_json: bool) -> Result<()> {
    if as_json {
        let json = serde_json::to_string_pretty(&ctx.config)?;
        println!("{}", json);
        return Ok(());
    }

    let source = if ctx.config_path.exists() {
        ctx.config_path.display().to_string()
    } else {
        "defaults".to_string()
    };

    println!("{}", "Configuration:".bold().underline());
    println!("{}", source.dimmed());
    println!();
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}

fn init_config(ctx: &AppContext, force: bool) -> Result<()> {
    let path = &ctx.config_path;
    if path.exists() && !force {
        bail!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Wrote default configuration to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

fn show_paths(ctx: &AppContext) -> Result<()> {
    println!("config: {}", ctx.config_path.display());
    println!("data:   {}", ctx.data_dir().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        let mut ctx = AppContext::for_tests(None);
        ctx.config_path = temp.path().join("nested").join("config.toml");

        init_config(&ctx, false).unwrap();
        let loaded = Config::load(&ctx.config_path).unwrap();
        assert_eq!(loaded.comments.max_comment_length, 10000);

        assert!(init_config(&ctx, false).is_err());
        assert!(init_config(&ctx, true).is_ok());
    }
}
