//! Comment command
//!
//! Add comments to threads and edit existing ones.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dt_core::types::{CommentId, ThreadId};

use super::AppContext;

/// Comment subcommands
#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Reply in an open thread
    Add {
        /// Thread ID
        thread_id: String,

        /// Comment text
        text: String,

        /// Actor writing the comment
        #[arg(long, env = "DATATHREAD_ACTOR")]
        actor: String,
    },

    /// Replace a comment's text, keeping the old text as a revision
    Edit {
        /// Comment ID
        comment_id: String,

        /// New comment text
        text: String,
    },
}

/// Execute the comment command
pub fn execute(ctx: &AppContext, cmd: CommentCommand) -> Result<()> {
    let manager = ctx.manager()?;

    match cmd {
        CommentCommand::Add {
            thread_id,
            text,
            actor,
        } => {
            let id = ThreadId::from_string(&thread_id)
                .context(format!("Invalid thread ID: {}", thread_id))?;
            let comment = manager
                .add_comment(&id, &actor, &text)
                .context(format!("Failed to add comment to thread '{}'", thread_id))?;

            println!(
                "{} Added comment {} to thread {}",
                "✓".green(),
                comment.id.to_string().green(),
                id.to_string().cyan()
            );
            print_terms(&comment.mentions, &comment.hashtags);
        }
        CommentCommand::Edit { comment_id, text } => {
            let id = CommentId::from_string(&comment_id)
                .context(format!("Invalid comment ID: {}", comment_id))?;
            let comment = manager
                .edit_comment(&id, &text)
                .context(format!("Failed to edit comment '{}'", comment_id))?;

            println!(
                "{} Edited comment {} ({} earlier revisions)",
                "✓".green(),
                comment.id.to_string().green(),
                comment.past_revisions.len()
            );
            print_terms(&comment.mentions, &comment.hashtags);
        }
    }

    Ok(())
}

fn print_terms(
    mentions: &std::collections::BTreeSet<String>,
    hashtags: &std::collections::BTreeSet<String>,
) {
    if !mentions.is_empty() {
        let names: Vec<_> = mentions.iter().map(|m| format!("@{}", m)).collect();
        println!("  mentions: {}", names.join(" ").cyan());
    }
    if !hashtags.is_empty() {
        let tags: Vec<_> = hashtags.iter().map(|t| format!("#{}", t)).collect();
        println!("  tags: {}", tags.join(" ").cyan());
    }
}
