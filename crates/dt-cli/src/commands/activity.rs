//! Activity command
//!
//! Search recent comments across all threads.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use dt_core::render::FormatterRegistry;
use dt_core::thread::{ActivityFilter, TargetType};

use super::{relative_age, AppContext};

/// Arguments for the activity command
#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Case-insensitive text to look for in comments
    #[arg(long, short)]
    pub search: Option<String>,

    /// Only comments by this actor
    #[arg(long)]
    pub author: Option<String>,

    /// Only threads in this database
    #[arg(long)]
    pub database: Option<String>,

    /// Only threads in this table
    #[arg(long)]
    pub table: Option<String>,

    /// Kind of target to search (database, table, row, column, value or any).
    /// Rows when omitted.
    #[arg(long = "type")]
    pub target_type: Option<String>,

    /// Require a hashtag (repeatable; all must match)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Only comments mentioning this actor
    #[arg(long)]
    pub mention: Option<String>,

    /// Search resolved threads instead of open ones
    #[arg(long)]
    pub resolved: bool,

    /// Maximum number of results
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ActivityArgs {
    /// Build the search filter, taking the default limit from configuration
    pub fn to_filter(&self, default_limit: usize) -> Result<ActivityFilter> {
        let mut filter = ActivityFilter::new().with_limit(self.limit.unwrap_or(default_limit));

        if let Some(search) = &self.search {
            filter = filter.with_search(search.as_str());
        }
        if let Some(author) = &self.author {
            filter = filter.with_author(author.as_str());
        }
        if let Some(database) = &self.database {
            filter = filter.with_database(database.as_str());
        }
        if let Some(table) = &self.table {
            filter = filter.with_table(table.as_str());
        }
        match self.target_type.as_deref() {
            None => {}
            Some("any") => filter = filter.with_any_target(),
            Some(name) => {
                let Some(target_type) = TargetType::from_name(name) else {
                    bail!(
                        "Unknown target type '{}' (expected database, table, row, column, value or any)",
                        name
                    );
                };
                filter = filter.with_target_type(target_type);
            }
        }
        for tag in &self.tags {
            filter = filter.with_tag(tag.as_str());
        }
        if let Some(mention) = &self.mention {
            filter = filter.with_mention(mention.as_str());
        }
        Ok(filter.with_resolved(self.resolved))
    }
}

/// Execute the activity command
pub fn execute(ctx: &AppContext, args: ActivityArgs) -> Result<()> {
    let filter = args.to_filter(ctx.config.activity.default_limit)?;
    let manager = ctx.manager()?;
    let items = manager.activity(&filter, chrono::Utc::now())?;

    if args.json {
        let json = serde_json::to_string_pretty(&items)?;
        println!("{}", json);
        return Ok(());
    }

    if items.is_empty() {
        println!("No matching comments.");
        return Ok(());
    }

    let registry = FormatterRegistry::from_config(&ctx.config.render);
    println!("{}", "Activity:".bold().underline());

    for item in &items {
        println!();
        let resolved = if item.resolved {
            format!(" {}", "resolved".yellow())
        } else {
            String::new()
        };
        println!(
            "  {} on {} ({}){}",
            item.author_actor_id.green(),
            item.target.to_string().cyan(),
            relative_age(item.created_at).dimmed(),
            resolved
        );
        let body = registry.format(&item.render_nodes, "plain")?;
        for line in body.lines() {
            println!("    {}", line);
        }
        println!(
            "    {} {}",
            "thread".dimmed(),
            item.thread_id.to_string().dimmed()
        );
    }

    if items.len() == filter.limit {
        println!(
            "\n  {} Showing the {} most recent matches. Use --limit to show more.",
            "ℹ".blue(),
            filter.limit
        );
    }

    Ok(())
}
