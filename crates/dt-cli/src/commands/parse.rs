//! Parse command
//!
//! Show how comment text is tokenized and rendered.

use anyhow::{Context, Result};
use clap::Args;
use dt_core::parser;
use dt_core::render::FormatterRegistry;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use super::AppContext;

/// Arguments for the parse command
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Comment text (reads stdin when neither TEXT nor --file is given)
    pub text: Option<String>,

    /// Read the comment from a file
    #[arg(long, short, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Output format: json, html, markdown or plain
    #[arg(long, short = 'F')]
    pub format: Option<String>,
}

/// Execute the parse command
pub fn execute(ctx: &AppContext, args: ParseArgs) -> Result<()> {
    let source = read_source(&args)?;
    let format = args
        .format
        .unwrap_or_else(|| ctx.config.render.default_format.clone());

    print!("{}", render(ctx, &source, &format)?);
    Ok(())
}

fn read_source(args: &ParseArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("Failed to read comment from stdin")?;
    Ok(source)
}

/// Render `source` in `format`, newline-terminated.
///
/// `json` emits the whole parse result; other formats render the nodes.
fn render(ctx: &AppContext, source: &str, format: &str) -> Result<String> {
    let result = parser::parse(source);
    let mut out = if format == "json" {
        serde_json::to_string_pretty(&result)?
    } else {
        FormatterRegistry::from_config(&ctx.config.render).format(&result.rendered, format)?
    };
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> AppContext {
        AppContext::for_tests(None)
    }

    #[test]
    fn test_render_plain() {
        let out = render(&ctx(), "hi @alex", "plain").unwrap();
        assert_eq!(out, "hi @alex\n");
    }

    #[test]
    fn test_render_json_has_all_views() {
        let out = render(&ctx(), "yo #sus @alex g", "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["tags"][0]["value"], "#sus");
        assert_eq!(value["mentions"][0]["start"], 8);
        assert_eq!(value["rendered"][1]["node_type"], "tag");
    }

    #[test]
    fn test_render_unknown_format() {
        assert!(render(&ctx(), "x", "yaml").is_err());
    }
}
