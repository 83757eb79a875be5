//! React command

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dt_core::types::CommentId;

use super::AppContext;

/// React subcommands
#[derive(Debug, Subcommand)]
pub enum ReactCommand {
    /// Add a reaction to a comment
    Add {
        /// Comment ID
        comment_id: String,

        /// Reaction, usually an emoji
        reaction: String,

        /// Actor reacting
        #[arg(long, env = "DATATHREAD_ACTOR")]
        actor: String,
    },

    /// Remove a reaction from a comment
    Remove {
        /// Comment ID
        comment_id: String,

        /// Reaction to remove
        reaction: String,

        /// Actor whose reaction is removed
        #[arg(long, env = "DATATHREAD_ACTOR")]
        actor: String,
    },
}

/// Execute the react command
pub fn execute(ctx: &AppContext, cmd: ReactCommand) -> Result<()> {
    let manager = ctx.manager()?;

    let (comment_id, reaction, actor, adding) = match cmd {
        ReactCommand::Add {
            comment_id,
            reaction,
            actor,
        } => (comment_id, reaction, actor, true),
        ReactCommand::Remove {
            comment_id,
            reaction,
            actor,
        } => (comment_id, reaction, actor, false),
    };

    let id = CommentId::from_string(&comment_id)
        .context(format!("Invalid comment ID: {}", comment_id))?;

    if adding {
        let added = manager
            .add_reaction(&id, &actor, &reaction)
            .context(format!("Failed to react to comment '{}'", comment_id))?;
        if added {
            println!("{} {} reacted {}", "✓".green(), actor.green(), reaction);
        } else {
            println!("{} {} already reacted {}", "ℹ".blue(), actor, reaction);
        }
    } else {
        let removed = manager
            .remove_reaction(&id, &actor, &reaction)
            .context(format!("Failed to remove reaction from comment '{}'", comment_id))?;
        if removed {
            println!("{} Removed {} from {}", "✓".green(), reaction, actor.green());
        } else {
            println!("{} {} had no {} reaction", "ℹ".blue(), actor, reaction);
        }
    }

    Ok(())
}
