//! Comment and reaction validation

use super::target::ThreadTarget;
use crate::config::CommentsConfig;
use crate::error::{DataThreadError, Result};

/// Maximum comment length in characters (default)
pub const MAX_COMMENT_LENGTH: usize = 10000;

/// Maximum reaction length in characters
pub const MAX_REACTION_LENGTH: usize = 32;

/// Validator for user input entering a thread
#[derive(Debug, Clone)]
pub struct CommentValidator {
    max_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_COMMENT_LENGTH,
        }
    }

    /// Create a new validator with custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Create a validator from configuration
    pub fn from_config(config: &CommentsConfig) -> Self {
        Self::with_max_length(config.max_comment_length)
    }

    /// Validate comment contents
    pub fn validate_contents(&self, contents: &str) -> Result<()> {
        if contents.trim().is_empty() {
            return Err(DataThreadError::Validation(
                "Comment contents cannot be empty".to_string(),
            ));
        }

        let len = contents.chars().count();
        if len > self.max_length {
            return Err(DataThreadError::Validation(format!(
                "Comment contents exceed maximum length of {} characters ({})",
                self.max_length, len
            )));
        }

        Ok(())
    }

    /// Validate a reaction string
    pub fn validate_reaction(&self, reaction: &str) -> Result<()> {
        let trimmed = reaction.trim();
        if trimmed.is_empty() {
            return Err(DataThreadError::Validation(
                "Reaction cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_REACTION_LENGTH {
            return Err(DataThreadError::Validation(format!(
                "Reaction exceeds maximum length of {} characters",
                MAX_REACTION_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate an actor ID
    pub fn validate_actor(&self, actor_id: &str) -> Result<()> {
        if actor_id.trim().is_empty() {
            return Err(DataThreadError::Validation(
                "An actor ID is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a thread target
    pub fn validate_target(&self, target: &ThreadTarget) -> Result<()> {
        target.validate()
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_contents_valid() {
        let validator = CommentValidator::new();
        assert!(validator.validate_contents("Valid comment").is_ok());
        assert!(validator.validate_contents("\nstarts with a break").is_ok());
    }

    #[test]
    fn test_validate_contents_empty() {
        let validator = CommentValidator::new();
        assert!(validator.validate_contents("").is_err());
        assert!(validator.validate_contents(" \n\t").is_err());
    }

    #[test]
    fn test_validate_contents_counts_characters() {
        let validator = CommentValidator::with_max_length(3);
        assert!(validator.validate_contents("日本語").is_ok());
        assert!(validator.validate_contents("日本語!").is_err());
    }

    #[test]
    fn test_from_config() {
        let config = CommentsConfig {
            max_comment_length: 5,
            ..Default::default()
        };
        let validator = CommentValidator::from_config(&config);
        assert!(validator.validate_contents("toolong").is_err());
    }

    #[test]
    fn test_validate_reaction() {
        let validator = CommentValidator::new();
        assert!(validator.validate_reaction("👍").is_ok());
        assert!(validator.validate_reaction("  ").is_err());
        assert!(validator.validate_reaction(&"x".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_actor_and_target() {
        let validator = CommentValidator::new();
        assert!(validator.validate_actor("alex").is_ok());
        assert!(validator.validate_actor("").is_err());
        assert!(validator
            .validate_target(&ThreadTarget::table("db", ""))
            .is_err());
    }
}
