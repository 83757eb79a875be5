//! Thread manager: validated operations backed by storage

use super::activity::{ActivityFilter, ActivityItem};
use super::book::ThreadBook;
use super::builder::ThreadBuilder;
use super::model::{Comment, Thread, ThreadInfo};
use super::persistence::ThreadStorage;
use super::target::ThreadTarget;
use super::validator::CommentValidator;
use crate::config::CommentsConfig;
use crate::error::{DataThreadError, Result};
use crate::types::{CommentId, ThreadId};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Manager for thread lifecycle
pub struct ThreadManager {
    /// Storage backend
    storage: Arc<dyn ThreadStorage>,
    /// Input validation rules
    validator: CommentValidator,
    /// Whether reactions may be added
    allow_reactions: bool,
}

impl ThreadManager {
    /// Create a new thread manager with the given storage
    pub fn new(storage: impl ThreadStorage + 'static) -> Self {
        Self::with_storage(Arc::new(storage))
    }

    /// Create a new thread manager with shared storage
    pub fn with_storage(storage: Arc<dyn ThreadStorage>) -> Self {
        Self {
            storage,
            validator: CommentValidator::new(),
            allow_reactions: true,
        }
    }

    /// Apply comment settings from configuration
    pub fn with_config(mut self, config: &CommentsConfig) -> Self {
        self.validator = CommentValidator::from_config(config);
        self.allow_reactions = config.allow_reactions;
        self
    }

    /// Open a thread on a target with its first comment
    pub fn create_thread(
        &self,
        target: ThreadTarget,
        actor_id: &str,
        contents: &str,
    ) -> Result<Thread> {
        let thread = ThreadBuilder::new(target)
            .creator(actor_id)
            .comment(contents)
            .validator(self.validator.clone())
            .build()?;
        self.storage.save(&thread)?;
        info!("Created thread {} on {}", thread.id, thread.target);
        Ok(thread)
    }

    /// Add a comment to an open thread
    pub fn add_comment(
        &self,
        thread_id: &ThreadId,
        actor_id: &str,
        contents: &str,
    ) -> Result<Comment> {
        self.validator.validate_actor(actor_id)?;
        self.validator.validate_contents(contents)?;

        let mut thread = self.storage.load(thread_id)?;
        if thread.is_resolved() {
            return Err(DataThreadError::Validation(format!(
                "Thread {} is resolved and cannot take new comments",
                thread_id
            )));
        }

        let comment = Comment::new(thread.id.clone(), actor_id, contents);
        thread.push_comment(comment.clone());
        self.storage.save(&thread)?;
        info!("Added comment {} to thread {}", comment.id, thread_id);
        Ok(comment)
    }

    /// Replace a comment's contents, keeping the previous text as a revision
    pub fn edit_comment(&self, comment_id: &CommentId, contents: &str) -> Result<Comment> {
        self.validator.validate_contents(contents)?;

        let mut thread = self.find_thread_for_comment(comment_id)?;
        let comment = thread
            .comment_mut(comment_id)
            .ok_or_else(|| DataThreadError::CommentNotFound(comment_id.to_string()))?;
        comment.edit(contents);
        let edited = comment.clone();
        thread.touch();
        self.storage.save(&thread)?;
        info!(
            "Edited comment {} ({} revisions)",
            comment_id,
            edited.past_revisions.len()
        );
        Ok(edited)
    }

    /// React to a comment. Returns false if the actor already had that reaction.
    pub fn add_reaction(
        &self,
        comment_id: &CommentId,
        actor_id: &str,
        reaction: &str,
    ) -> Result<bool> {
        if !self.allow_reactions {
            return Err(DataThreadError::Validation(
                "Reactions are disabled".to_string(),
            ));
        }
        self.validator.validate_actor(actor_id)?;
        self.validator.validate_reaction(reaction)?;

        let mut thread = self.find_thread_for_comment(comment_id)?;
        let comment = thread
            .comment_mut(comment_id)
            .ok_or_else(|| DataThreadError::CommentNotFound(comment_id.to_string()))?;
        let added = comment.add_reaction(actor_id, reaction.trim());
        if added {
            self.storage.save(&thread)?;
            debug!("{} reacted {} to comment {}", actor_id, reaction, comment_id);
        }
        Ok(added)
    }

    /// Withdraw a reaction. Returns false if there was nothing to remove.
    pub fn remove_reaction(
        &self,
        comment_id: &CommentId,
        actor_id: &str,
        reaction: &str,
    ) -> Result<bool> {
        let mut thread = self.find_thread_for_comment(comment_id)?;
        let comment = thread
            .comment_mut(comment_id)
            .ok_or_else(|| DataThreadError::CommentNotFound(comment_id.to_string()))?;
        let removed = comment.remove_reaction(actor_id, reaction.trim());
        if removed {
            self.storage.save(&thread)?;
            debug!("{} removed {} from comment {}", actor_id, reaction, comment_id);
        }
        Ok(removed)
    }

    /// Mark a thread resolved
    pub fn resolve(&self, thread_id: &ThreadId) -> Result<Thread> {
        let mut thread = self.storage.load(thread_id)?;
        if thread.resolve() {
            self.storage.save(&thread)?;
            info!("Resolved thread {}", thread_id);
        } else {
            debug!("Thread {} was already resolved", thread_id);
        }
        Ok(thread)
    }

    /// Load a thread by ID
    pub fn load(&self, id: &ThreadId) -> Result<Thread> {
        self.storage.load(id)
    }

    /// List threads, most recently updated first
    pub fn list(&self, include_resolved: bool) -> Result<Vec<ThreadInfo>> {
        let mut threads: Vec<_> = self
            .storage
            .list()?
            .into_iter()
            .filter(|t| include_resolved || !t.resolved)
            .collect();
        threads.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(threads)
    }

    /// Load every thread into an indexed book
    pub fn book(&self) -> Result<ThreadBook> {
        Ok(ThreadBook::from_threads(self.storage.load_all()?))
    }

    /// Search comments across all threads
    pub fn activity(&self, filter: &ActivityFilter, now: DateTime<Utc>) -> Result<Vec<ActivityItem>> {
        Ok(self.book()?.activity(filter, now))
    }

    /// Delete a thread
    pub fn delete(&self, id: &ThreadId) -> Result<()> {
        self.storage.delete(id)?;
        info!("Deleted thread {}", id);
        Ok(())
    }

    /// Check if a thread exists
    pub fn exists(&self, id: &ThreadId) -> bool {
        self.storage.exists(id)
    }

    /// Get access to the underlying storage
    pub fn storage(&self) -> &dyn ThreadStorage {
        self.storage.as_ref()
    }

    fn find_thread_for_comment(&self, comment_id: &CommentId) -> Result<Thread> {
        self.storage
            .load_all()?
            .into_iter()
            .find(|t| t.comment(comment_id).is_some())
            .ok_or_else(|| DataThreadError::CommentNotFound(comment_id.to_string()))
    }
}
