//! datathread - threaded comments for tabular data
//!
//! Attach discussion threads to databases, tables, rows, columns and single
//! values, with `@mentions`, `#hashtags` and links parsed out of every comment.
//!
//! ## Quick Start
//!
//! ```bash
//! # See how a comment is parsed
//! datathread parse "ping @simon about #cleanup https://example.com"
//!
//! # Open a thread on a row
//! datathread thread new --database fixtures --table facetable --rowids 1 \
//!     --comment "is this right @simon #data" --actor alex
//!
//! # Search recent activity
//! datathread activity --tag data
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
