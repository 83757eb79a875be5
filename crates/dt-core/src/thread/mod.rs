//! Discussion threads attached to databases, tables, rows, columns and values
//!
//! A thread holds an ordered list of comments. Each comment carries the
//! mentions and hashtags found in its text at write time, its earlier
//! revisions, and the reactions actors have left on it.
//!
//! # Example
//!
//! ```ignore
//! use dt_core::thread::{ThreadManager, ThreadTarget};
//! use dt_storage::FileSystemStorage;
//!
//! let manager = ThreadManager::new(FileSystemStorage::new("/tmp/datathread")?);
//! let thread = manager.create_thread(
//!     ThreadTarget::row("fixtures", "facetable", ["1"]),
//!     "alex",
//!     "is this right @simon #data",
//! )?;
//! manager.add_comment(&thread.id, "simon", "looks fine to me")?;
//! ```

mod activity;
mod book;
mod builder;
mod index;
mod manager;
pub mod migration;
mod model;
mod persistence;
mod target;
mod validator;

pub use activity::{ActivityFilter, ActivityItem, DEFAULT_ACTIVITY_LIMIT};
pub use book::{RowThread, TableViewThreads, ThreadBook};
pub use builder::ThreadBuilder;
pub use index::ThreadIndex;
pub use manager::ThreadManager;
pub use migration::{ThreadFile, ThreadMigrator, CURRENT_SCHEMA_VERSION};
pub use model::{Comment, CommentTerms, Reaction, Revision, Thread, ThreadInfo};
pub use persistence::ThreadStorage;
pub use target::{decode_rowids, tilde_decode, tilde_encode, TargetType, ThreadTarget};
pub use validator::{CommentValidator, MAX_COMMENT_LENGTH, MAX_REACTION_LENGTH};

#[cfg(test)]
pub use persistence::memory::MemoryStorage;
