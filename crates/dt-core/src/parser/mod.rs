//! Comment parser
//!
//! Turns raw comment text into tokens (mentions, hashtags, URLs) and a safe
//! sequence of render nodes.
//!
//! # Overview
//!
//! Parsing is a pure function of the input string:
//! - [`tokenize`] splits on Unicode whitespace, keeping character offsets
//! - [`Token::kind`] classifies each token by prefix (`@`, `#`, `http`)
//! - [`render_nodes`] interleaves raw text, line breaks and classified tokens
//!
//! It never fails and holds no state, so it can be called from any thread.
//!
//! # Example
//!
//! ```
//! use dt_core::parser::{parse, RenderNode};
//!
//! let result = parse("yo #sus @alex g");
//! assert_eq!(result.tags[0].value, "#sus");
//! assert_eq!(result.mentions[0].value, "@alex");
//! assert_eq!(result.rendered[1], RenderNode::Tag("#sus".to_string()));
//! ```

mod render;
mod token;
mod tokenizer;
mod url;


pub use render::{render_nodes, split_raw_paragraphs, NodeType, RenderNode};
pub use token::{Token, TokenKind, HASHTAG_SIGIL, MENTION_SIGIL, URL_PREFIX};
pub use tokenizer::tokenize;
pub use url::valid_url;

use serde::{Deserialize, Serialize};

/// A fully parsed comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// All tokens, in source order
    pub tokens: Vec<Token>,
    /// Render nodes clients can use to safely display the comment
    pub rendered: Vec<RenderNode>,
    /// Tokens that start with `#`
    pub tags: Vec<Token>,
    /// Tokens that start with `@`
    pub mentions: Vec<Token>,
    /// Tokens that are URLs
    pub urls: Vec<Token>,
}

impl ParseResult {
    /// Check if the comment has any mentions, hashtags or URLs
    pub fn has_special_tokens(&self) -> bool {
        !(self.tags.is_empty() && self.mentions.is_empty() && self.urls.is_empty())
    }
}

/// Parse a comment.
pub fn parse(source: &str) -> ParseResult {
    let tokens = tokenize(source);
    let rendered = render_nodes(source, &tokens);

    let mut tags = Vec::new();
    let mut mentions = Vec::new();
    let mut urls = Vec::new();
    for token in &tokens {
        match token.kind() {
            TokenKind::Hashtag => tags.push(token.clone()),
            TokenKind::Mention => mentions.push(token.clone()),
            TokenKind::Url => urls.push(token.clone()),
            TokenKind::Word => {}
        }
    }

    ParseResult {
        tokens,
        rendered,
        tags,
        mentions,
        urls,
    }
}
