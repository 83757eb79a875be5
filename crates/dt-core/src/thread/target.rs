//! Thread targets: what a discussion is attached to

use crate::error::{DataThreadError, Result};
use crate::types::TargetKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The database object a thread is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ThreadTarget {
    /// A whole database
    Database {
        /// Database name
        database: String,
    },
    /// A table
    Table {
        /// Database name
        database: String,
        /// Table name
        table: String,
    },
    /// A single row, identified by its primary key values
    Row {
        /// Database name
        database: String,
        /// Table name
        table: String,
        /// Primary key values, in key order
        rowids: Vec<String>,
    },
    /// A column of a table
    Column {
        /// Database name
        database: String,
        /// Table name
        table: String,
        /// Column name
        column: String,
    },
    /// One cell: a column of a specific row
    Value {
        /// Database name
        database: String,
        /// Table name
        table: String,
        /// Column name
        column: String,
        /// Primary key values, in key order
        rowids: Vec<String>,
    },
}

impl ThreadTarget {
    /// Target a database
    pub fn database(database: impl Into<String>) -> Self {
        ThreadTarget::Database {
            database: database.into(),
        }
    }

    /// Target a table
    pub fn table(database: impl Into<String>, table: impl Into<String>) -> Self {
        ThreadTarget::Table {
            database: database.into(),
            table: table.into(),
        }
    }

    /// Target a row
    pub fn row(
        database: impl Into<String>,
        table: impl Into<String>,
        rowids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        ThreadTarget::Row {
            database: database.into(),
            table: table.into(),
            rowids: rowids.into_iter().map(Into::into).collect(),
        }
    }

    /// Target a column
    pub fn column(
        database: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        ThreadTarget::Column {
            database: database.into(),
            table: table.into(),
            column: column.into(),
        }
    }

    /// Target a single value
    pub fn value(
        database: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
        rowids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        ThreadTarget::Value {
            database: database.into(),
            table: table.into(),
            column: column.into(),
            rowids: rowids.into_iter().map(Into::into).collect(),
        }
    }

    /// Pick the most specific target the given parts describe.
    ///
    /// `rowids` is the tilde-encoded, comma-separated form used in row URLs.
    pub fn from_parts(
        database: impl Into<String>,
        table: Option<String>,
        column: Option<String>,
        rowids: Option<&str>,
    ) -> Result<Self> {
        let database = database.into();
        let rowids = rowids.map(decode_rowids);
        let target = match (table, column, rowids) {
            (None, None, None) => ThreadTarget::Database { database },
            (Some(table), None, None) => ThreadTarget::Table { database, table },
            (Some(table), None, Some(rowids)) => ThreadTarget::Row {
                database,
                table,
                rowids,
            },
            (Some(table), Some(column), None) => ThreadTarget::Column {
                database,
                table,
                column,
            },
            (Some(table), Some(column), Some(rowids)) => ThreadTarget::Value {
                database,
                table,
                column,
                rowids,
            },
            (None, _, _) => {
                return Err(DataThreadError::Validation(
                    "A table is required when targeting a row or column".to_string(),
                ))
            }
        };
        Ok(target)
    }

    /// The target's kind
    pub fn target_type(&self) -> TargetType {
        match self {
            ThreadTarget::Database { .. } => TargetType::Database,
            ThreadTarget::Table { .. } => TargetType::Table,
            ThreadTarget::Row { .. } => TargetType::Row,
            ThreadTarget::Column { .. } => TargetType::Column,
            ThreadTarget::Value { .. } => TargetType::Value,
        }
    }

    /// Database name
    pub fn database_name(&self) -> &str {
        match self {
            ThreadTarget::Database { database }
            | ThreadTarget::Table { database, .. }
            | ThreadTarget::Row { database, .. }
            | ThreadTarget::Column { database, .. }
            | ThreadTarget::Value { database, .. } => database,
        }
    }

    /// Table name, if the target is inside a table
    pub fn table_name(&self) -> Option<&str> {
        match self {
            ThreadTarget::Database { .. } => None,
            ThreadTarget::Table { table, .. }
            | ThreadTarget::Row { table, .. }
            | ThreadTarget::Column { table, .. }
            | ThreadTarget::Value { table, .. } => Some(table),
        }
    }

    /// Column name, for column and value targets
    pub fn column_name(&self) -> Option<&str> {
        match self {
            ThreadTarget::Column { column, .. } | ThreadTarget::Value { column, .. } => {
                Some(column)
            }
            _ => None,
        }
    }

    /// Row primary key values, for row and value targets
    pub fn rowids(&self) -> Option<&[String]> {
        match self {
            ThreadTarget::Row { rowids, .. } | ThreadTarget::Value { rowids, .. } => {
                Some(rowids)
            }
            _ => None,
        }
    }

    /// Row primary keys joined with `/`, each tilde-encoded
    pub fn encoded_rowids(&self) -> Option<String> {
        self.rowids().map(|ids| {
            ids.iter()
                .map(|id| tilde_encode(id))
                .collect::<Vec<_>>()
                .join("/")
        })
    }

    /// Stable key shared by all threads on the same target
    pub fn key(&self) -> TargetKey {
        let mut canonical = String::from(self.target_type().as_str());
        let mut push = |part: &str| {
            canonical.push('\u{1f}');
            canonical.push_str(part);
        };
        push(self.database_name());
        if let Some(table) = self.table_name() {
            push(table);
        }
        if let Some(column) = self.column_name() {
            push(column);
        }
        if let Some(rowids) = self.rowids() {
            for id in rowids {
                push(id);
            }
        }
        TargetKey::from_canonical(&canonical)
    }

    /// Check that every name is present
    pub fn validate(&self) -> Result<()> {
        let mut names = vec![("database", self.database_name())];
        if let Some(table) = self.table_name() {
            names.push(("table", table));
        }
        if let Some(column) = self.column_name() {
            names.push(("column", column));
        }
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(DataThreadError::Validation(format!(
                    "target type {} requires a non-empty '{}' field",
                    self.target_type(),
                    field
                )));
            }
        }
        if let Some(rowids) = self.rowids() {
            if rowids.is_empty() {
                return Err(DataThreadError::Validation(format!(
                    "target type {} requires at least one row ID",
                    self.target_type()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ThreadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.database_name())?;
        if let Some(table) = self.table_name() {
            write!(f, "/{}", table)?;
        }
        if let Some(rowids) = self.encoded_rowids() {
            write!(f, "/{}", rowids)?;
        }
        if let Some(column) = self.column_name() {
            write!(f, " [{}]", column)?;
        }
        Ok(())
    }
}

/// Kind of thread target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Database,
    Table,
    Row,
    Column,
    Value,
}

impl TargetType {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Database => "database",
            TargetType::Table => "table",
            TargetType::Row => "row",
            TargetType::Column => "column",
            TargetType::Value => "value",
        }
    }

    /// Parse from the lowercase name
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "database" => Some(TargetType::Database),
            "table" => Some(TargetType::Table),
            "row" => Some(TargetType::Row),
            "column" => Some(TargetType::Column),
            "value" => Some(TargetType::Value),
            _ => None,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tilde-encode a primary key value for use in a URL path segment.
///
/// Bytes outside `[A-Za-z0-9_-]` become `~XX`; space becomes `+`.
pub fn tilde_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => out.push(b as char),
            b' ' => out.push('+'),
            _ => out.push_str(&format!("~{:02X}", b)),
        }
    }
    out
}

/// Reverse [`tilde_encode`]. Malformed escapes are kept literally.
pub fn tilde_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'~' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(byte) = hex {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'~');
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Split a comma-separated list of tilde-encoded row IDs
pub fn decode_rowids(encoded: &str) -> Vec<String> {
    encoded.split(',').map(tilde_decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_target_serialization() {
        let target = ThreadTarget::row("foo", "bar", ["1"]);
        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["type"], "row");
        assert_eq!(json["database"], "foo");
        assert_eq!(json["rowids"][0], "1");

        let back: ThreadTarget = serde_json::from_value(json).unwrap();
        assert_eq!(back, target);
    }

    #[test]
    fn test_deserialize_tagged_params() {
        let target: ThreadTarget =
            serde_json::from_str(r#"{"type":"column","database":"d","table":"t","column":"c"}"#)
                .unwrap();
        assert_eq!(target, ThreadTarget::column("d", "t", "c"));

        let missing = serde_json::from_str::<ThreadTarget>(r#"{"type":"table","database":"d"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_accessors() {
        let target = ThreadTarget::value("db", "t", "c", ["1", "2"]);
        assert_eq!(target.target_type(), TargetType::Value);
        assert_eq!(target.database_name(), "db");
        assert_eq!(target.table_name(), Some("t"));
        assert_eq!(target.column_name(), Some("c"));
        assert_eq!(target.rowids(), Some(&["1".to_string(), "2".to_string()][..]));

        let db = ThreadTarget::database("db");
        assert_eq!(db.table_name(), None);
        assert_eq!(db.rowids(), None);
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(
            ThreadTarget::from_parts("d", None, None, None).unwrap(),
            ThreadTarget::database("d")
        );
        assert_eq!(
            ThreadTarget::from_parts("d", Some("t".into()), None, Some("a~2Fb,2")).unwrap(),
            ThreadTarget::row("d", "t", ["a/b", "2"])
        );
        assert_eq!(
            ThreadTarget::from_parts("d", Some("t".into()), Some("c".into()), Some("1")).unwrap(),
            ThreadTarget::value("d", "t", "c", ["1"])
        );
        assert!(ThreadTarget::from_parts("d", None, Some("c".into()), None).is_err());
    }

    #[test]
    fn test_key_distinguishes_targets() {
        let row = ThreadTarget::row("d", "t", ["1"]);
        assert_eq!(row.key(), ThreadTarget::row("d", "t", ["1"]).key());
        assert_ne!(row.key(), ThreadTarget::row("d", "t", ["2"]).key());
        assert_ne!(row.key(), ThreadTarget::value("d", "t", "1", Vec::<String>::new()).key());
        assert_ne!(
            ThreadTarget::table("d", "t").key(),
            ThreadTarget::database("d").key()
        );
    }

    #[test]
    fn test_validate() {
        assert!(ThreadTarget::table("d", "t").validate().is_ok());
        assert!(ThreadTarget::table("d", " ").validate().is_err());
        assert!(ThreadTarget::database("").validate().is_err());
        assert!(ThreadTarget::row("d", "t", Vec::<String>::new())
            .validate()
            .is_err());
    }

    #[test]
    fn test_tilde_encoding() {
        assert_eq!(tilde_encode("abc_-1"), "abc_-1");
        assert_eq!(tilde_encode("a/b c"), "a~2Fb+c");
        assert_eq!(tilde_encode("é"), "~C3~A9");
        assert_eq!(tilde_decode("a~2Fb+c"), "a/b c");
        assert_eq!(tilde_decode("~C3~A9"), "é");
        assert_eq!(tilde_decode("50%~"), "50%~");
        assert_eq!(tilde_decode("~zz"), "~zz");
    }

    #[test]
    fn test_tilde_decode_requires_two_hex_digits() {
        assert_eq!(tilde_decode("~+1"), "~ 1");
        assert_eq!(tilde_decode("~-1"), "~-1");
        assert_eq!(tilde_decode("~2"), "~2");
        assert_eq!(tilde_decode("~2f"), "/");
    }

    #[test]
    fn test_display() {
        assert_eq!(ThreadTarget::row("db", "t", ["1", "a b"]).to_string(), "db/t/1/a+b");
        assert_eq!(ThreadTarget::column("db", "t", "c").to_string(), "db/t [c]");
    }
}
