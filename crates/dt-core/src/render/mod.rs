//! Output formats for parsed comments
//!
//! Formatters walk a comment's [`RenderNode`](crate::parser::RenderNode)
//! sequence and produce display text. Every formatter treats raw text as
//! untrusted and escapes it for its target format.
//!
//! # Example
//!
//! ```
//! use dt_core::parser::parse;
//! use dt_core::render::FormatterRegistry;
//!
//! let registry = FormatterRegistry::new();
//! let html = registry.format(&parse("hi @alex").rendered, "html").unwrap();
//! assert_eq!(html, r#"hi <span class="mention">@alex</span>"#);
//! ```

mod formatter;
mod html;
mod json;
mod markdown;
mod plain;

pub use formatter::{FormatterRegistry, NodeFormatter};
pub use html::{escape_html, HtmlFormatter};
pub use json::JsonFormatter;
pub use markdown::{escape_markdown, MarkdownFormatter};
pub use plain::PlainFormatter;
