//! Thread indexing for fast lookup

use super::model::Thread;
use crate::types::{CommentId, TargetKey, ThreadId};
use std::collections::HashMap;

/// Multi-dimensional index over a set of threads
#[derive(Debug, Clone, Default)]
pub struct ThreadIndex {
    /// Threads by target key
    by_target: HashMap<TargetKey, Vec<ThreadId>>,
    /// Threads by hashtag (without `#`)
    by_tag: HashMap<String, Vec<ThreadId>>,
    /// Comments by mentioned username (without `@`)
    by_mention: HashMap<String, Vec<CommentId>>,
    /// Owning thread of each comment
    comment_thread: HashMap<CommentId, ThreadId>,
}

impl ThreadIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a thread to the index
    pub fn add(&mut self, thread: &Thread) {
        self.by_target
            .entry(thread.target.key())
            .or_default()
            .push(thread.id.clone());

        for tag in thread.hashtags() {
            self.by_tag
                .entry(tag.to_string())
                .or_default()
                .push(thread.id.clone());
        }

        for comment in &thread.comments {
            self.comment_thread
                .insert(comment.id.clone(), thread.id.clone());
            for mention in &comment.mentions {
                self.by_mention
                    .entry(mention.clone())
                    .or_default()
                    .push(comment.id.clone());
            }
        }
    }

    /// Remove a thread from the index
    pub fn remove(&mut self, thread: &Thread) {
        let key = thread.target.key();
        if let Some(ids) = self.by_target.get_mut(&key) {
            ids.retain(|id| id != &thread.id);
            if ids.is_empty() {
                self.by_target.remove(&key);
            }
        }

        for tag in thread.hashtags() {
            if let Some(ids) = self.by_tag.get_mut(tag) {
                ids.retain(|id| id != &thread.id);
                if ids.is_empty() {
                    self.by_tag.remove(tag);
                }
            }
        }

        for comment in &thread.comments {
            self.comment_thread.remove(&comment.id);
            for mention in &comment.mentions {
                if let Some(ids) = self.by_mention.get_mut(mention) {
                    ids.retain(|id| id != &comment.id);
                    if ids.is_empty() {
                        self.by_mention.remove(mention);
                    }
                }
            }
        }
    }

    /// Threads on a target
    pub fn get_by_target(&self, key: &TargetKey) -> Vec<ThreadId> {
        self.by_target.get(key).cloned().unwrap_or_default()
    }

    /// Threads using a hashtag
    pub fn get_by_tag(&self, tag: &str) -> Vec<ThreadId> {
        self.by_tag.get(tag).cloned().unwrap_or_default()
    }

    /// Comments mentioning a username
    pub fn get_by_mention(&self, username: &str) -> Vec<CommentId> {
        self.by_mention.get(username).cloned().unwrap_or_default()
    }

    /// Thread owning a comment
    pub fn thread_of(&self, comment_id: &CommentId) -> Option<&ThreadId> {
        self.comment_thread.get(comment_id)
    }

    /// All hashtags with their thread counts
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<_> = self
            .by_tag
            .iter()
            .map(|(tag, ids)| (tag.as_str(), ids.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        counts
    }

    /// Clear the entire index
    pub fn clear(&mut self) {
        self.by_target.clear();
        self.by_tag.clear();
        self.by_mention.clear();
        self.comment_thread.clear();
    }
}
