//! Token and classification types

use super::url::valid_url;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A whitespace-delimited run of characters in a comment.
///
/// `start` and `end` are character offsets (Unicode scalar values, not bytes)
/// into the source; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Offset of the first character
    pub start: usize,
    /// Offset one past the last character
    pub end: usize,
    /// The token text, exactly as it appears in the source
    pub value: String,
}

impl Token {
    /// Create a new token
    pub fn new(start: usize, end: usize, value: impl Into<String>) -> Self {
        Self {
            start,
            end,
            value: value.into(),
        }
    }

    /// Number of characters in the token, zero for a reversed span
    pub fn char_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Classify the token.
    ///
    /// Prefixes are checked in a fixed order: `@`, then `#`, then `http`
    /// followed by URL validation. The first match wins.
    pub fn kind(&self) -> TokenKind {
        if self.is_mention() {
            TokenKind::Mention
        } else if self.is_hashtag() {
            TokenKind::Hashtag
        } else if self.is_url() {
            TokenKind::Url
        } else {
            TokenKind::Word
        }
    }

    /// Token starts with `@`
    pub fn is_mention(&self) -> bool {
        self.value.starts_with(MENTION_SIGIL)
    }

    /// Token starts with `#`
    pub fn is_hashtag(&self) -> bool {
        self.value.starts_with(HASHTAG_SIGIL)
    }

    /// Token starts with `http` and is a well-formed absolute URL
    pub fn is_url(&self) -> bool {
        self.value.starts_with(URL_PREFIX) && valid_url(&self.value)
    }

    /// The token text without its leading sigil.
    ///
    /// Returns `None` for tokens that are neither mentions nor hashtags.
    pub fn name(&self) -> Option<&str> {
        self.value
            .strip_prefix(MENTION_SIGIL)
            .or_else(|| self.value.strip_prefix(HASHTAG_SIGIL))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}..{}", self.value, self.start, self.end)
    }
}

/// Leading character of a mention
pub const MENTION_SIGIL: char = '@';

/// Leading character of a hashtag
pub const HASHTAG_SIGIL: char = '#';

/// Prefix a token must carry before URL validation is attempted
pub const URL_PREFIX: &str = "http";

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// `@username`
    Mention,
    /// `#label`
    Hashtag,
    /// Absolute URL with scheme and authority
    Url,
    /// Anything else
    Word,
}
