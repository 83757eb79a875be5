//! Thread file format and schema migration

use super::model::Thread;
use crate::error::{DataThreadError, Result};
use crate::types::ProtocolVersion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// On-disk thread document with schema version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadFile {
    /// Schema version for migration
    pub schema_version: String,
    /// The thread data
    pub thread: Thread,
    /// Extra fields for forward compatibility
    #[serde(flatten, default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ThreadFile {
    /// Wrap a thread with the current schema version
    pub fn new(thread: Thread) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            thread,
            extra: HashMap::new(),
        }
    }

    /// Get the thread, consuming the file
    pub fn into_thread(self) -> Thread {
        self.thread
    }

    /// Parse schema version
    pub fn parse_version(&self) -> Option<ProtocolVersion> {
        ProtocolVersion::parse(&self.schema_version)
    }
}

/// Thread schema migrator
pub struct ThreadMigrator;

impl ThreadMigrator {
    /// Bring a thread file up to the current schema version
    pub fn migrate(mut file: ThreadFile) -> Result<ThreadFile> {
        let version = file.parse_version().ok_or_else(|| {
            DataThreadError::UnsupportedSchemaVersion(file.schema_version.clone())
        })?;

        let current = ProtocolVersion::V1_0;
        if !version.is_compatible(&current) {
            return Err(DataThreadError::UnsupportedSchemaVersion(format!(
                "{} (expected {}.x)",
                file.schema_version, current.major
            )));
        }

        if Self::needs_migration(&file) {
            debug!(
                "Migrating thread {} from schema {} to {}",
                file.thread.id, file.schema_version, CURRENT_SCHEMA_VERSION
            );
            file.schema_version = CURRENT_SCHEMA_VERSION.to_string();
        }

        Ok(file)
    }

    /// Check if a file needs migration
    pub fn needs_migration(file: &ThreadFile) -> bool {
        file.schema_version != CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::target::ThreadTarget;

    fn create_test_thread() -> Thread {
        Thread::new("alex", ThreadTarget::table("foo", "bar"))
    }

    #[test]
    fn test_thread_file_creation() {
        let thread = create_test_thread();
        let file = ThreadFile::new(thread.clone());

        assert_eq!(file.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(file.parse_version(), Some(ProtocolVersion::V1_0));
        assert_eq!(file.into_thread().id, thread.id);
    }

    #[test]
    fn test_migrate_current_version() {
        let file = ThreadFile::new(create_test_thread());
        assert!(!ThreadMigrator::needs_migration(&file));

        let migrated = ThreadMigrator::migrate(file).unwrap();
        assert_eq!(migrated.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_migrate_older_minor_version() {
        let mut file = ThreadFile::new(create_test_thread());
        file.schema_version = "1.3".to_string();
        assert!(ThreadMigrator::needs_migration(&file));

        let migrated = ThreadMigrator::migrate(file).unwrap();
        assert_eq!(migrated.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_migrate_incompatible_version() {
        let mut file = ThreadFile::new(create_test_thread());
        file.schema_version = "2.0".to_string();

        let result = ThreadMigrator::migrate(file);
        assert!(matches!(
            result,
            Err(DataThreadError::UnsupportedSchemaVersion(_))
        ));
    }

    #[test]
    fn test_migrate_malformed_version() {
        let mut file = ThreadFile::new(create_test_thread());
        file.schema_version = "one".to_string();
        assert!(ThreadMigrator::migrate(file).is_err());
    }

    #[test]
    fn test_thread_file_forward_compatibility() {
        let json = r#"{
            "schema_version": "1.0",
            "thread": {
                "id": "6f9619ff-8b86-4d01-b42d-00c04fc964ff",
                "creator_actor_id": "alex",
                "target": {"type": "database", "database": "foo"},
                "created_at": "2024-12-31T12:00:00Z",
                "updated_at": "2024-12-31T12:00:00Z"
            },
            "future_field": "some value"
        }"#;

        let file: ThreadFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.schema_version, "1.0");
        assert!(file.extra.contains_key("future_field"));
        assert!(file.thread.comments.is_empty());
        assert!(!file.thread.is_resolved());
    }
}
