//! dt-core - Core library for datathread
//!
//! This crate provides the core logic for threaded data comments: the comment
//! parser, the thread and comment model, activity search and render-node
//! output formats.

pub mod error;
pub mod types;
pub mod config;
pub mod parser;
pub mod thread;
pub mod render;

pub use error::{DataThreadError, Result};
pub use types::*;
