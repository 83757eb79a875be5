//! Thread builder for fluent API

use super::model::{Comment, Thread};
use super::target::ThreadTarget;
use super::validator::CommentValidator;
use crate::error::{DataThreadError, Result};

/// Builder for opening a new thread with its first comment
pub struct ThreadBuilder {
    target: ThreadTarget,
    creator: Option<String>,
    comment: Option<String>,
    validator: CommentValidator,
}

impl ThreadBuilder {
    /// Create a new builder for a target
    pub fn new(target: ThreadTarget) -> Self {
        Self {
            target,
            creator: None,
            comment: None,
            validator: CommentValidator::new(),
        }
    }

    /// Set the actor opening the thread
    pub fn creator(mut self, actor_id: impl Into<String>) -> Self {
        self.creator = Some(actor_id.into());
        self
    }

    /// Set the opening comment
    pub fn comment(mut self, contents: impl Into<String>) -> Self {
        self.comment = Some(contents.into());
        self
    }

    /// Use a custom validator
    pub fn validator(mut self, validator: CommentValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Build the thread
    pub fn build(self) -> Result<Thread> {
        let creator = self.creator.ok_or_else(|| {
            DataThreadError::Validation("Thread creator is required".to_string())
        })?;
        let contents = self.comment.ok_or_else(|| {
            DataThreadError::Validation("An opening comment is required".to_string())
        })?;

        self.validator.validate_actor(&creator)?;
        self.validator.validate_target(&self.target)?;
        self.validator.validate_contents(&contents)?;

        let mut thread = Thread::new(creator.clone(), self.target);
        let comment = Comment::new(thread.id.clone(), creator, contents);
        thread.push_comment(comment);
        thread.updated_at = thread.created_at;
        Ok(thread)
    }
}
