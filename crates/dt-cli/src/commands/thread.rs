//! Thread command
//!
//! Open, inspect, resolve and list threads.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dt_core::parser::RenderNode;
use dt_core::render::FormatterRegistry;
use dt_core::thread::{Comment, Thread, ThreadInfo, ThreadTarget};
use dt_core::types::ThreadId;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{relative_age, AppContext};

/// Thread subcommands
#[derive(Debug, Subcommand)]
pub enum ThreadCommand {
    /// Open a new thread with its first comment
    New {
        /// Database the thread is about
        #[arg(long)]
        database: String,

        /// Table within the database
        #[arg(long)]
        table: Option<String>,

        /// Tilde-encoded primary key values, comma separated
        #[arg(long)]
        rowids: Option<String>,

        /// Column within the table
        #[arg(long)]
        column: Option<String>,

        /// Opening comment
        #[arg(long)]
        comment: String,

        /// Actor writing the comment
        #[arg(long, env = "DATATHREAD_ACTOR")]
        actor: String,
    },

    /// Show a thread and its comments
    Show {
        /// Thread ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Format for comment bodies: plain, html, markdown or json
        #[arg(long, short = 'F', default_value = "plain")]
        format: String,
    },

    /// Mark a thread resolved
    Resolve {
        /// Thread ID
        id: String,
    },

    /// List threads
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Include resolved threads
        #[arg(long)]
        include_resolved: bool,
    },
}

/// Execute the thread command
pub fn execute(ctx: &AppContext, cmd: ThreadCommand) -> Result<()> {
    match cmd {
        ThreadCommand::New {
            database,
            table,
            rowids,
            column,
            comment,
            actor,
        } => {
            let target = ThreadTarget::from_parts(database, table, column, rowids.as_deref())?;
            new_thread(ctx, target, &comment, &actor)
        }
        ThreadCommand::Show { id, json, format } => show_thread(ctx, &id, json, &format),
        ThreadCommand::Resolve { id } => resolve_thread(ctx, &id),
        ThreadCommand::List {
            json,
            include_resolved,
        } => list_threads(ctx, json, include_resolved),
    }
}

fn parse_thread_id(id: &str) -> Result<ThreadId> {
    ThreadId::from_string(id).context(format!("Invalid thread ID: {}", id))
}

fn new_thread(ctx: &AppContext, target: ThreadTarget, comment: &str, actor: &str) -> Result<()> {
    let manager = ctx.manager()?;
    let thread = manager
        .create_thread(target, actor, comment)
        .context("Failed to create thread")?;

    println!(
        "{} Created thread {} on {}",
        "✓".green(),
        thread.id.to_string().green(),
        thread.target.to_string().cyan()
    );
    if let Some(first) = thread.first_comment() {
        println!("  comment {}", first.id.to_string().dimmed());
    }
    Ok(())
}

/// A comment with its render nodes, as emitted by `thread show --json`
#[derive(Serialize)]
struct CommentView<'a> {
    #[serde(flatten)]
    comment: &'a Comment,
    render_nodes: Vec<RenderNode>,
    reaction_counts: BTreeMap<&'a str, usize>,
}

#[derive(Serialize)]
struct ThreadView<'a> {
    #[serde(flatten)]
    info: ThreadInfo,
    comments: Vec<CommentView<'a>>,
}

impl<'a> ThreadView<'a> {
    fn new(thread: &'a Thread) -> Self {
        Self {
            info: thread.info(),
            comments: thread
                .comments
                .iter()
                .map(|comment| CommentView {
                    comment,
                    render_nodes: comment.render_nodes(),
                    reaction_counts: comment.reaction_counts(),
                })
                .collect(),
        }
    }
}

fn show_thread(ctx: &AppContext, id: &str, as_json: bool, format: &str) -> Result<()> {
    let manager = ctx.manager()?;
    let thread_id = parse_thread_id(id)?;
    let thread = manager
        .load(&thread_id)
        .context(format!("Thread '{}' not found", id))?;

    if as_json {
        let json = serde_json::to_string_pretty(&ThreadView::new(&thread))?;
        println!("{}", json);
        return Ok(());
    }

    let registry = FormatterRegistry::from_config(&ctx.config.render);

    println!("{}", "Thread Details".bold().underline());
    println!();
    println!("  ID: {}", thread.id.to_string().green());
    println!(
        "  Target: {} ({})",
        thread.target.to_string().cyan(),
        thread.target.target_type()
    );
    println!("  Opened by: {}", thread.creator_actor_id);
    println!(
        "  Created: {}",
        thread.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    match thread.resolved_at {
        Some(at) => println!(
            "  Status: {} {}",
            "resolved".yellow(),
            at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        ),
        None => println!("  Status: {}", "open".green()),
    }

    println!();
    println!("{}", "Comments".bold());
    for comment in &thread.comments {
        let edited = if comment.past_revisions.is_empty() {
            String::new()
        } else {
            format!(" (edited {}x)", comment.past_revisions.len())
        };
        println!();
        println!(
            "  {} {}{}",
            comment.author_actor_id.green(),
            relative_age(comment.created_at).dimmed(),
            edited.dimmed()
        );
        let body = registry.format(&comment.render_nodes(), format)?;
        for line in body.lines() {
            println!("    {}", line);
        }
        let reactions = comment.reaction_counts();
        if !reactions.is_empty() {
            let summary: Vec<String> = reactions
                .iter()
                .map(|(reaction, count)| format!("{} {}", reaction, count))
                .collect();
            println!("    {}", summary.join("  ").dimmed());
        }
        println!("    {}", comment.id.to_string().dimmed());
    }

    Ok(())
}

fn resolve_thread(ctx: &AppContext, id: &str) -> Result<()> {
    let manager = ctx.manager()?;
    let thread_id = parse_thread_id(id)?;
    manager
        .resolve(&thread_id)
        .context(format!("Failed to resolve thread '{}'", id))?;

    println!("{} Resolved thread {}", "✓".green(), thread_id.to_string().green());
    Ok(())
}

fn list_threads(ctx: &AppContext, as_json: bool, include_resolved: bool) -> Result<()> {
    let manager = ctx.manager()?;
    let threads = manager.list(include_resolved)?;

    if as_json {
        let json = serde_json::to_string_pretty(&threads)?;
        println!("{}", json);
        return Ok(());
    }

    if threads.is_empty() {
        println!("No threads found.");
        return Ok(());
    }

    println!("{}", "Threads:".bold().underline());
    println!();

    for info in &threads {
        let status = if info.resolved {
            "resolved".yellow()
        } else {
            "open".green()
        };
        let tags = if info.hashtags.is_empty() {
            String::new()
        } else {
            format!(
                " {}",
                info.hashtags
                    .iter()
                    .map(|t| format!("#{}", t))
                    .collect::<Vec<_>>()
                    .join(" ")
            )
        };
        println!(
            "  {} {} [{}] {} comments ({}){}",
            info.id.to_string().green(),
            info.target.to_string().cyan(),
            status,
            info.comment_count.to_string().yellow(),
            relative_age(info.updated_at).dimmed(),
            tags.cyan()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dt_core::thread::ThreadBuilder;

    #[test]
    fn test_parse_thread_id() {
        assert!(parse_thread_id("not-a-uuid").is_err());
        let id = ThreadId::new();
        assert_eq!(parse_thread_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_thread_view_json() {
        let mut thread = ThreadBuilder::new(ThreadTarget::row("db", "t", ["1"]))
            .creator("alex")
            .comment("hi @simon")
            .build()
            .unwrap();
        let comment_id = thread.comments[0].id.clone();
        thread
            .comment_mut(&comment_id)
            .unwrap()
            .add_reaction("simon", "👍");

        let value = serde_json::to_value(ThreadView::new(&thread)).unwrap();
        assert_eq!(value["target"]["type"], "row");
        assert_eq!(value["comment_count"], 1);
        assert_eq!(value["comments"][0]["author_actor_id"], "alex");
        assert_eq!(value["comments"][0]["render_nodes"][1]["node_type"], "mention");
        assert_eq!(value["comments"][0]["reaction_counts"]["👍"], 1);
    }
}
