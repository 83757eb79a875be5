//! HTML output for render nodes

use super::formatter::NodeFormatter;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::parser::{RenderNode, HASHTAG_SIGIL};

/// Renders nodes as an HTML fragment. All text is escaped.
pub struct HtmlFormatter {
    /// Base path hashtag links point under
    tag_base_url: String,
    /// Add `target="_blank"` to URL links
    link_target_blank: bool,
}

impl HtmlFormatter {
    /// Create a formatter with the default settings
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    /// Create a formatter from render configuration
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            tag_base_url: config.tag_base_url.trim_end_matches('/').to_string(),
            link_target_blank: config.link_target_blank,
        }
    }

    /// Set the hashtag link base path
    pub fn with_tag_base_url(mut self, base: impl Into<String>) -> Self {
        self.tag_base_url = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set whether URL links open in a new tab
    pub fn with_target_blank(mut self, blank: bool) -> Self {
        self.link_target_blank = blank;
        self
    }

    fn render_node(&self, node: &RenderNode, out: &mut String) {
        match node {
            RenderNode::Raw(text) => out.push_str(&escape_html(text)),
            RenderNode::Linebreak => out.push_str("<br>"),
            RenderNode::Mention(mention) => {
                out.push_str(&format!(
                    r#"<span class="mention">{}</span>"#,
                    escape_html(mention)
                ));
            }
            RenderNode::Tag(tag) => {
                let name = tag.strip_prefix(HASHTAG_SIGIL).unwrap_or(tag);
                let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
                out.push_str(&format!(
                    r#"<a class="tag" href="{}/{}">{}</a>"#,
                    escape_html(&self.tag_base_url),
                    escape_html(&encoded),
                    escape_html(tag)
                ));
            }
            RenderNode::Url(href) => {
                let target = if self.link_target_blank {
                    r#" target="_blank""#
                } else {
                    ""
                };
                out.push_str(&format!(
                    r#"<a href="{0}" rel="nofollow noopener"{1}>{0}</a>"#,
                    escape_html(href),
                    target
                ));
            }
        }
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeFormatter for HtmlFormatter {
    fn format(&self, nodes: &[RenderNode]) -> Result<String> {
        let mut out = String::new();
        for node in nodes {
            self.render_node(node, &mut out);
        }
        Ok(out)
    }

    fn format_name(&self) -> &str {
        "html"
    }
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn html(source: &str) -> String {
        HtmlFormatter::new().format(&parse(source).rendered).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_raw_text_is_escaped() {
        assert_eq!(html("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
    }

    #[test]
    fn test_special_nodes() {
        assert_eq!(
            html("hi @alex see #bug at https://x.com"),
            concat!(
                "hi ",
                r#"<span class="mention">@alex</span>"#,
                " see ",
                r#"<a class="tag" href="/-/datasette-comments/tags/bug">#bug</a>"#,
                " at ",
                r#"<a href="https://x.com" rel="nofollow noopener" target="_blank">https://x.com</a>"#,
            )
        );
    }

    #[test]
    fn test_linebreaks() {
        assert_eq!(html("a\nb"), "a<br>b");
    }

    #[test]
    fn test_url_attribute_is_escaped() {
        let out = HtmlFormatter::new()
            .with_target_blank(false)
            .format(&[RenderNode::Url(r#"https://x.com/?a="b"&c"#.to_string())])
            .unwrap();
        assert_eq!(
            out,
            r#"<a href="https://x.com/?a=&quot;b&quot;&amp;c" rel="nofollow noopener">https://x.com/?a=&quot;b&quot;&amp;c</a>"#
        );
    }

    #[test]
    fn test_tag_name_is_url_encoded() {
        let out = HtmlFormatter::new()
            .with_tag_base_url("/tags/")
            .format(&[RenderNode::Tag("#a&b".to_string())])
            .unwrap();
        assert_eq!(out, r#"<a class="tag" href="/tags/a%26b">#a&amp;b</a>"#);
    }
}
