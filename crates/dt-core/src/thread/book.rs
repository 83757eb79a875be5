//! In-memory collection of threads with indexed lookup

use super::activity::{ActivityFilter, ActivityItem};
use super::index::ThreadIndex;
use super::model::{Comment, Thread};
use super::target::ThreadTarget;
use crate::error::{DataThreadError, Result};
use crate::types::{CommentId, ThreadId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Threads keyed by ID, with an index by target, tag and mention
#[derive(Debug, Clone, Default)]
pub struct ThreadBook {
    threads: HashMap<ThreadId, Thread>,
    index: ThreadIndex,
}

/// Threads visible from a table page, grouped by what they target
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableViewThreads {
    /// Unresolved threads on the table itself
    pub table_threads: Vec<ThreadId>,
    /// Unresolved threads on any column of the table
    pub column_threads: Vec<ThreadId>,
    /// Unresolved threads on the requested rows
    pub row_threads: Vec<RowThread>,
    /// Unresolved threads on values in the requested rows
    pub value_threads: Vec<ThreadId>,
}

/// A row thread along with its encoded primary key path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowThread {
    pub id: ThreadId,
    pub rowids: String,
}

impl ThreadBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from loaded threads
    pub fn from_threads(threads: impl IntoIterator<Item = Thread>) -> Self {
        let mut book = Self::new();
        for thread in threads {
            book.replace(thread);
        }
        book
    }

    /// Add a new thread
    pub fn insert(&mut self, thread: Thread) -> Result<ThreadId> {
        let id = thread.id.clone();
        if self.threads.contains_key(&id) {
            return Err(DataThreadError::Validation(format!(
                "Thread with ID {} already exists",
                id
            )));
        }
        self.index.add(&thread);
        self.threads.insert(id.clone(), thread);
        Ok(id)
    }

    /// Insert or overwrite a thread, keeping the index in sync
    pub fn replace(&mut self, thread: Thread) {
        if let Some(old) = self.threads.remove(&thread.id) {
            self.index.remove(&old);
        }
        self.index.add(&thread);
        self.threads.insert(thread.id.clone(), thread);
    }

    /// Remove a thread
    pub fn remove(&mut self, id: &ThreadId) -> Result<Thread> {
        let thread = self
            .threads
            .remove(id)
            .ok_or_else(|| DataThreadError::ThreadNotFound(id.to_string()))?;
        self.index.remove(&thread);
        Ok(thread)
    }

    /// Get a thread by ID
    pub fn get(&self, id: &ThreadId) -> Option<&Thread> {
        self.threads.get(id)
    }

    /// Number of threads
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Check if the book is empty
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// All threads, oldest first
    pub fn all_sorted(&self) -> Vec<&Thread> {
        let mut threads: Vec<_> = self.threads.values().collect();
        threads.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        threads
    }

    /// Thread that owns a comment
    pub fn thread_for_comment(&self, comment_id: &CommentId) -> Option<&Thread> {
        self.index
            .thread_of(comment_id)
            .and_then(|id| self.threads.get(id))
    }

    /// Look up a comment anywhere in the book
    pub fn comment(&self, comment_id: &CommentId) -> Option<&Comment> {
        self.thread_for_comment(comment_id)
            .and_then(|thread| thread.comment(comment_id))
    }

    /// Threads on exactly this target, oldest first
    pub fn threads_on_target(&self, target: &ThreadTarget, include_resolved: bool) -> Vec<&Thread> {
        self.collect_sorted(
            self.index.get_by_target(&target.key()),
            include_resolved,
        )
    }

    /// Unresolved threads using a hashtag
    pub fn threads_with_tag(&self, tag: &str) -> Vec<&Thread> {
        let tag = tag.strip_prefix('#').unwrap_or(tag);
        self.collect_sorted(self.index.get_by_tag(tag), false)
    }

    /// Comments mentioning a username
    pub fn comments_mentioning(&self, username: &str) -> Vec<&Comment> {
        let username = username.strip_prefix('@').unwrap_or(username);
        self.index
            .get_by_mention(username)
            .iter()
            .filter_map(|id| self.comment(id))
            .collect()
    }

    /// Hashtags with their thread counts, most used first
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        self.index.tag_counts()
    }

    /// Unresolved threads shown on a table page.
    ///
    /// `rowids` are the encoded primary key paths of the rows on screen, in
    /// the `/`-joined form produced by [`ThreadTarget::encoded_rowids`].
    pub fn table_view_threads(
        &self,
        database: &str,
        table: &str,
        rowids: &[String],
    ) -> TableViewThreads {
        let mut view = TableViewThreads::default();
        for thread in self.all_sorted() {
            if thread.is_resolved()
                || thread.target.database_name() != database
                || thread.target.table_name() != Some(table)
            {
                continue;
            }
            let on_screen = thread
                .target
                .encoded_rowids()
                .filter(|encoded| rowids.contains(encoded));
            match &thread.target {
                ThreadTarget::Table { .. } => view.table_threads.push(thread.id.clone()),
                ThreadTarget::Column { .. } => view.column_threads.push(thread.id.clone()),
                ThreadTarget::Row { .. } => {
                    if let Some(encoded) = on_screen {
                        view.row_threads.push(RowThread {
                            id: thread.id.clone(),
                            rowids: encoded,
                        });
                    }
                }
                ThreadTarget::Value { .. } => {
                    if on_screen.is_some() {
                        view.value_threads.push(thread.id.clone());
                    }
                }
                ThreadTarget::Database { .. } => {}
            }
        }
        view
    }

    /// Search comments across all threads
    pub fn activity(&self, filter: &ActivityFilter, now: DateTime<Utc>) -> Vec<ActivityItem> {
        filter.apply(self.threads.values(), now)
    }

    fn collect_sorted(&self, ids: Vec<ThreadId>, include_resolved: bool) -> Vec<&Thread> {
        let mut threads: Vec<_> = ids
            .iter()
            .filter_map(|id| self.threads.get(id))
            .filter(|t| include_resolved || !t.is_resolved())
            .collect();
        threads.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        threads
    }
}
