//! Activity search across all comments

use super::model::{Comment, Thread};
use super::target::{TargetType, ThreadTarget};
use crate::parser::RenderNode;
use crate::types::{CommentId, ThreadId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default maximum number of activity results
pub const DEFAULT_ACTIVITY_LIMIT: usize = 100;

/// Filter for activity search.
///
/// A fresh filter matches comments on open row threads. Use
/// [`ActivityFilter::with_any_target`] to widen the target kind and
/// [`ActivityFilter::with_resolved`] to search resolved threads instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFilter {
    /// Case-insensitive substring of the comment contents
    pub search: Option<String>,
    /// Exact author actor ID
    pub author: Option<String>,
    /// Target database
    pub database: Option<String>,
    /// Target table
    pub table: Option<String>,
    /// Target kind, `None` for any
    pub target_type: Option<TargetType>,
    /// Hashtags the comment must all carry (without `#`)
    pub tags: Vec<String>,
    /// Username the comment must mention (without `@`)
    pub mention: Option<String>,
    /// Search resolved threads instead of open ones
    pub resolved: bool,
    /// Maximum number of results
    pub limit: usize,
}

impl Default for ActivityFilter {
    fn default() -> Self {
        Self {
            search: None,
            author: None,
            database: None,
            table: None,
            target_type: Some(TargetType::Row),
            tags: Vec::new(),
            mention: None,
            resolved: false,
            limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }
}

impl ActivityFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by contents
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filter by author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Filter by database
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Filter by table
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Filter by target kind
    pub fn with_target_type(mut self, target_type: TargetType) -> Self {
        self.target_type = Some(target_type);
        self
    }

    /// Match threads on any kind of target
    pub fn with_any_target(mut self) -> Self {
        self.target_type = None;
        self
    }

    /// Require a hashtag. Empty tags are ignored.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let tag = tag.strip_prefix('#').unwrap_or(&tag).to_string();
        if !tag.is_empty() {
            self.tags.push(tag);
        }
        self
    }

    /// Require a mention
    pub fn with_mention(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.mention = Some(username.strip_prefix('@').unwrap_or(&username).to_string());
        self
    }

    /// Select resolved (`true`) or open (`false`) threads
    pub fn with_resolved(mut self, resolved: bool) -> Self {
        self.resolved = resolved;
        self
    }

    /// Set the result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Check if a thread could contain matches
    pub fn matches_thread(&self, thread: &Thread) -> bool {
        if thread.is_resolved() != self.resolved {
            return false;
        }
        if let Some(ref database) = self.database {
            if thread.target.database_name() != database {
                return false;
            }
        }
        if let Some(ref table) = self.table {
            if thread.target.table_name() != Some(table.as_str()) {
                return false;
            }
        }
        if let Some(target_type) = self.target_type {
            if thread.target.target_type() != target_type {
                return false;
            }
        }
        true
    }

    /// Check if a comment matches
    pub fn matches_comment(&self, comment: &Comment) -> bool {
        if let Some(ref author) = self.author {
            if &comment.author_actor_id != author {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            if !comment
                .contents
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if !self.tags.iter().all(|tag| comment.hashtags.contains(tag)) {
            return false;
        }
        if let Some(ref mention) = self.mention {
            if !comment.mentions.contains(mention) {
                return false;
            }
        }
        true
    }

    /// Run the filter over threads, newest comments first
    pub fn apply<'a>(
        &self,
        threads: impl IntoIterator<Item = &'a Thread>,
        now: DateTime<Utc>,
    ) -> Vec<ActivityItem> {
        let mut items: Vec<ActivityItem> = threads
            .into_iter()
            .filter(|thread| self.matches_thread(thread))
            .flat_map(|thread| {
                thread
                    .comments
                    .iter()
                    .filter(|comment| self.matches_comment(comment))
                    .map(move |comment| ActivityItem::new(thread, comment, now))
            })
            .collect();

        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.comment_id.cmp(&b.comment_id))
        });
        items.truncate(self.limit);
        items
    }
}

/// One comment in an activity listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityItem {
    pub thread_id: ThreadId,
    pub comment_id: CommentId,
    pub author_actor_id: String,
    pub contents: String,
    pub created_at: DateTime<Utc>,
    /// Seconds between creation and the time of the search
    pub created_duration_seconds: f64,
    pub target: ThreadTarget,
    pub resolved: bool,
    pub hashtags: BTreeSet<String>,
    pub mentions: BTreeSet<String>,
    pub render_nodes: Vec<RenderNode>,
}

impl ActivityItem {
    fn new(thread: &Thread, comment: &Comment, now: DateTime<Utc>) -> Self {
        let age = now.signed_duration_since(comment.created_at);
        Self {
            thread_id: thread.id.clone(),
            comment_id: comment.id.clone(),
            author_actor_id: comment.author_actor_id.clone(),
            contents: comment.contents.clone(),
            created_at: comment.created_at,
            created_duration_seconds: age.num_milliseconds() as f64 / 1000.0,
            target: thread.target.clone(),
            resolved: thread.is_resolved(),
            hashtags: comment.hashtags.clone(),
            mentions: comment.mentions.clone(),
            render_nodes: comment.render_nodes(),
        }
    }
}
