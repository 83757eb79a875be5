//! Thread storage trait and abstractions

use super::model::{Thread, ThreadInfo};
use crate::error::Result;
use crate::types::ThreadId;

/// Trait for thread storage implementations
pub trait ThreadStorage: Send + Sync {
    /// Save a thread
    fn save(&self, thread: &Thread) -> Result<()>;

    /// Load a thread by ID
    fn load(&self, id: &ThreadId) -> Result<Thread>;

    /// Load every stored thread
    fn load_all(&self) -> Result<Vec<Thread>>;

    /// Delete a thread
    fn delete(&self, id: &ThreadId) -> Result<()>;

    /// Check if a thread exists
    fn exists(&self, id: &ThreadId) -> bool;

    /// List all threads (as info)
    fn list(&self) -> Result<Vec<ThreadInfo>> {
        Ok(self.load_all()?.iter().map(Thread::info).collect())
    }
}
