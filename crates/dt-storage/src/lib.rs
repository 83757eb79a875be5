//! dt-storage - Storage library for datathread
//!
//! This crate provides the file-system implementation of the thread store.

mod thread_store;

pub use thread_store::{default_data_dir, FileSystemStorage};
