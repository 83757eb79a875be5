//! Thread, comment and reaction models

use super::target::ThreadTarget;
use crate::parser::{self, ParseResult, RenderNode};
use crate::types::{CommentId, TargetKey, ThreadId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A discussion attached to a target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    /// Unique thread identifier
    pub id: ThreadId,
    /// Actor who opened the thread
    pub creator_actor_id: String,
    /// What the thread is about
    pub target: ThreadTarget,
    /// When the thread was created
    pub created_at: DateTime<Utc>,
    /// When the thread last changed
    pub updated_at: DateTime<Utc>,
    /// When the thread was marked resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Comments in creation order
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Thread {
    /// Create an empty thread
    pub fn new(creator_actor_id: impl Into<String>, target: ThreadTarget) -> Self {
        let now = Utc::now();
        Self {
            id: ThreadId::new(),
            creator_actor_id: creator_actor_id.into(),
            target,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            comments: Vec::new(),
        }
    }

    /// Check if the thread has been resolved
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }

    /// Mark the thread resolved. Returns false if it already was.
    pub fn resolve(&mut self) -> bool {
        if self.is_resolved() {
            return false;
        }
        let now = Utc::now();
        self.resolved_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Append a comment
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
        self.touch();
    }

    /// Get a comment by ID
    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    /// Get a mutable comment by ID
    pub fn comment_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| &c.id == id)
    }

    /// The opening comment
    pub fn first_comment(&self) -> Option<&Comment> {
        self.comments.first()
    }

    /// Union of all hashtags used in the thread
    pub fn hashtags(&self) -> BTreeSet<&str> {
        self.comments
            .iter()
            .flat_map(|c| c.hashtags.iter().map(String::as_str))
            .collect()
    }

    /// Union of all actors mentioned in the thread
    pub fn mentions(&self) -> BTreeSet<&str> {
        self.comments
            .iter()
            .flat_map(|c| c.mentions.iter().map(String::as_str))
            .collect()
    }

    /// Summary of the thread
    pub fn info(&self) -> ThreadInfo {
        ThreadInfo {
            id: self.id.clone(),
            target: self.target.clone(),
            target_key: self.target.key(),
            creator_actor_id: self.creator_actor_id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            resolved: self.is_resolved(),
            comment_count: self.comments.len(),
            hashtags: self.hashtags().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Lightweight thread summary for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadInfo {
    pub id: ThreadId,
    pub target: ThreadTarget,
    pub target_key: TargetKey,
    pub creator_actor_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved: bool,
    pub comment_count: usize,
    pub hashtags: Vec<String>,
}

/// A comment inside a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Thread the comment belongs to
    pub thread_id: ThreadId,
    /// Actor who wrote the comment
    pub author_actor_id: String,
    /// Raw comment text
    pub contents: String,
    /// Mentioned usernames, without `@`
    #[serde(default)]
    pub mentions: BTreeSet<String>,
    /// Hashtags, without `#`
    #[serde(default)]
    pub hashtags: BTreeSet<String>,
    /// Earlier versions of `contents`, oldest first
    #[serde(default)]
    pub past_revisions: Vec<Revision>,
    /// Reactions in the order they were added
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment, indexing its mentions and hashtags
    pub fn new(
        thread_id: ThreadId,
        author_actor_id: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        let contents = contents.into();
        let terms = CommentTerms::from_contents(&contents);
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            thread_id,
            author_actor_id: author_actor_id.into(),
            contents,
            mentions: terms.mentions,
            hashtags: terms.hashtags,
            past_revisions: Vec::new(),
            reactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the contents, keeping the old text as a revision
    pub fn edit(&mut self, contents: impl Into<String>) {
        let contents = contents.into();
        let terms = CommentTerms::from_contents(&contents);
        let now = Utc::now();
        let previous = std::mem::replace(&mut self.contents, contents);
        self.past_revisions.push(Revision {
            contents: previous,
            replaced_at: now,
        });
        self.mentions = terms.mentions;
        self.hashtags = terms.hashtags;
        self.updated_at = now;
    }

    /// Parse the contents
    pub fn parse(&self) -> ParseResult {
        parser::parse(&self.contents)
    }

    /// Render nodes for display
    pub fn render_nodes(&self) -> Vec<RenderNode> {
        self.parse().rendered
    }

    /// Add a reaction. Returns false if the actor already reacted this way.
    pub fn add_reaction(&mut self, reactor_actor_id: &str, reaction: &str) -> bool {
        if self.has_reaction(reactor_actor_id, reaction) {
            return false;
        }
        self.reactions.push(Reaction {
            reactor_actor_id: reactor_actor_id.to_string(),
            reaction: reaction.to_string(),
        });
        true
    }

    /// Remove a reaction. Returns false if there was nothing to remove.
    pub fn remove_reaction(&mut self, reactor_actor_id: &str, reaction: &str) -> bool {
        let before = self.reactions.len();
        self.reactions
            .retain(|r| !(r.reactor_actor_id == reactor_actor_id && r.reaction == reaction));
        self.reactions.len() != before
    }

    /// Check if an actor has a given reaction on this comment
    pub fn has_reaction(&self, reactor_actor_id: &str, reaction: &str) -> bool {
        self.reactions
            .iter()
            .any(|r| r.reactor_actor_id == reactor_actor_id && r.reaction == reaction)
    }

    /// Count of each distinct reaction
    pub fn reaction_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.reactions {
            *counts.entry(r.reaction.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// A previous version of a comment's contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub contents: String,
    pub replaced_at: DateTime<Utc>,
}

/// An actor's reaction to a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Actor who reacted
    pub reactor_actor_id: String,
    /// Reaction text, usually an emoji
    pub reaction: String,
}

/// Searchable terms extracted from a comment at write time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTerms {
    /// Mentioned usernames, without `@`
    pub mentions: BTreeSet<String>,
    /// Hashtags, without `#`
    pub hashtags: BTreeSet<String>,
}

impl CommentTerms {
    /// Parse `contents` and collect its terms
    pub fn from_contents(contents: &str) -> Self {
        Self::from_parse(&parser::parse(contents))
    }

    /// Collect terms from a parse result, stripping sigils and deduplicating
    pub fn from_parse(result: &ParseResult) -> Self {
        let strip = |tokens: &[parser::Token]| {
            tokens
                .iter()
                .filter_map(|t| t.name())
                .map(str::to_string)
                .collect::<BTreeSet<_>>()
        };
        Self {
            mentions: strip(&result.mentions),
            hashtags: strip(&result.tags),
        }
    }
}
