//! Markdown output for render nodes

use super::formatter::NodeFormatter;
use crate::error::Result;
use crate::parser::RenderNode;

/// Renders nodes as Markdown: escaped text, bold hashtags, linked URLs
pub struct MarkdownFormatter {
    /// Emit mentions as inline code
    code_mentions: bool,
}

impl MarkdownFormatter {
    /// Create a new Markdown formatter
    pub fn new() -> Self {
        Self {
            code_mentions: false,
        }
    }

    /// Set whether mentions are wrapped in backticks
    pub fn with_code_mentions(mut self, code: bool) -> Self {
        self.code_mentions = code;
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeFormatter for MarkdownFormatter {
    fn format(&self, nodes: &[RenderNode]) -> Result<String> {
        let mut out = String::new();
        for node in nodes {
            match node {
                RenderNode::Raw(text) => out.push_str(&escape_markdown(text)),
                // Trailing double space forces a hard break
                RenderNode::Linebreak => out.push_str("  \n"),
                RenderNode::Mention(mention) if self.code_mentions => {
                    out.push_str(&format!("`{}`", mention));
                }
                RenderNode::Mention(mention) => out.push_str(&escape_markdown(mention)),
                RenderNode::Tag(tag) => out.push_str(&format!("**{}**", escape_markdown(tag))),
                RenderNode::Url(url) => out.push_str(&format!(
                    "[{}]({})",
                    escape_markdown(url),
                    encode_link_target(url)
                )),
            }
        }
        Ok(out)
    }

    fn format_name(&self) -> &str {
        "markdown"
    }
}

/// Backslash-escape characters with inline Markdown meaning
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn encode_link_target(url: &str) -> String {
    url.replace('(', "%28").replace(')', "%29")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn markdown(source: &str) -> String {
        MarkdownFormatter::new().format(&parse(source).rendered).unwrap()
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("a_b*c [d]"), r"a\_b\*c \[d\]");
        assert_eq!(escape_markdown("plain"), "plain");
    }

    #[test]
    fn test_tags_bold_and_urls_linked() {
        assert_eq!(
            markdown("see #bug_1 at https://x.com/a_(b)"),
            r"see **#bug\_1** at [https://x.com/a\_(b)](https://x.com/a_%28b%29)"
        );
    }

    #[test]
    fn test_mentions() {
        assert_eq!(markdown("hi @al_ex"), r"hi @al\_ex");
        let out = MarkdownFormatter::new()
            .with_code_mentions(true)
            .format(&parse("hi @al_ex").rendered)
            .unwrap();
        assert_eq!(out, "hi `@al_ex`");
    }

    #[test]
    fn test_linebreaks() {
        assert_eq!(markdown("one\ntwo"), "one  \ntwo");
    }
}
