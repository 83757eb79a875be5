//! Core type definitions for datathread

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreadId(pub Uuid);

impl ThreadId {
    /// Generate a new ThreadId
    pub fn new() -> Self {
        ThreadId(Uuid::new_v4())
    }

    /// Parse from a UUID string
    pub fn from_string(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s.trim()).map(ThreadId).map_err(|e| {
            crate::DataThreadError::Validation(format!("Invalid thread ID '{}': {}", s, e))
        })
    }
}

impl Default for ThreadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a comment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
    /// Generate a new CommentId
    pub fn new() -> Self {
        CommentId(Uuid::new_v4())
    }

    /// Parse from a UUID string
    pub fn from_string(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s.trim()).map(CommentId).map_err(|e| {
            crate::DataThreadError::Validation(format!("Invalid comment ID '{}': {}", s, e))
        })
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable key for a thread target, shared by every thread on that target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetKey(pub String);

impl TargetKey {
    /// Hash the canonical target description
    pub fn from_canonical(canonical: &str) -> Self {
        let hash = blake3::hash(canonical.as_bytes());
        TargetKey(format!("t_{}", &hash.to_hex()[..12]))
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Protocol version for compatibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
}

impl ProtocolVersion {
    pub const V1_0: Self = Self { major: 1, minor: 0 };

    /// Parse a `major.minor` string
    pub fn parse(s: &str) -> Option<Self> {
        let (major, minor) = s.split_once('.')?;
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }

    /// Check if this version is compatible with another version
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.major == other.major
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::V1_0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_id_uniqueness() {
        assert_ne!(ThreadId::new(), ThreadId::new());
    }

    #[test]
    fn test_thread_id_round_trip() {
        let id = ThreadId::new();
        let parsed = ThreadId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(ThreadId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_comment_id_parse_trims() {
        let id = CommentId::new();
        let parsed = CommentId::from_string(&format!("  {}\n", id)).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_target_key_stability() {
        let a = TargetKey::from_canonical("row:db:table:[\"1\"]");
        let b = TargetKey::from_canonical("row:db:table:[\"1\"]");
        let c = TargetKey::from_canonical("row:db:table:[\"2\"]");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_str().starts_with("t_"));
        assert_eq!(a.as_str().len(), 14);
    }

    #[test]
    fn test_protocol_version() {
        let v1_1 = ProtocolVersion::parse("1.1").unwrap();
        assert!(ProtocolVersion::V1_0.is_compatible(&v1_1));
        assert!(!ProtocolVersion::V1_0.is_compatible(&ProtocolVersion { major: 2, minor: 0 }));
        assert!(ProtocolVersion::parse("1").is_none());
        assert!(ProtocolVersion::parse("a.b").is_none());
        assert_eq!(v1_1.to_string(), "1.1");
    }
}
