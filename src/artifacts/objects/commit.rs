//! Commit object
//!
//! A commit is a complete snapshot of the tracked files at one point in time,
//! not a diff. It contains:
//! - The parent commit id (absent only for the initial commit)
//! - The commit timestamp
//! - The full mapping from repository-relative path to blob id
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! date <unix-seconds> <timezone>
//! file <blob-sha> <path>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{MalformedObject, Object, Packable, Unpackable, envelope};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::PathBuf;

/// Snapshot of tracked files: repository-relative path to blob id
pub type FileMap = BTreeMap<PathBuf, ObjectId>;

/// Message of the commit every repository starts from
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit id (None for the initial commit)
    parent: Option<ObjectId>,
    /// When the commit was recorded
    timestamp: DateTime<FixedOffset>,
    /// Commit message
    message: String,
    /// Complete snapshot of tracked files
    files: FileMap,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        message: String,
        files: FileMap,
    ) -> Self {
        Commit {
            parent,
            timestamp,
            message,
            files,
        }
    }

    /// The parentless, file-less commit created by `init`, stamped at the Unix epoch
    pub fn initial() -> Self {
        Commit::new(
            None,
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            INITIAL_COMMIT_MESSAGE.to_string(),
            FileMap::new(),
        )
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the commit message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn files(&self) -> &FileMap {
        &self.files
    }

    pub fn blob_for(&self, path: &std::path::Path) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn tracks(&self, path: &std::path::Path) -> bool {
        self.files.contains_key(path)
    }

    /// Timestamp as `YYYY-MM-DD HH:MM:SS` in the commit's own offset
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        // workspace normalization keeps tracked paths UTF-8 and free of line breaks
        for (path, oid) in &self.files {
            lines.push(format!("file {} {}", oid, path.to_string_lossy()));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        envelope(self.object_type(), lines.join("\n").as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> Result<Self, MalformedObject> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()
            .map_err(|e| MalformedObject(format!("unreadable commit: {e}")))?;
        let content = String::from_utf8(content)
            .map_err(|_| MalformedObject("commit is not valid UTF-8".to_string()))?;

        // headers and message are separated by the first empty line
        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| MalformedObject("missing message separator".to_string()))?;

        let mut parent = None;
        let mut timestamp = None;
        let mut files = FileMap::new();

        for line in headers.split('\n') {
            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| MalformedObject(format!("invalid header line '{line}'")))?;

            match key {
                "parent" => parent = Some(parse_oid(value)?),
                "date" => timestamp = Some(parse_timestamp(value)?),
                "file" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .ok_or_else(|| MalformedObject(format!("invalid file line '{line}'")))?;
                    files.insert(PathBuf::from(path), parse_oid(oid)?);
                }
                other => return Err(MalformedObject(format!("unknown header '{other}'"))),
            }
        }

        let timestamp = timestamp.ok_or_else(|| MalformedObject("missing date".to_string()))?;

        Ok(Commit::new(parent, timestamp, message.to_string(), files))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

fn parse_oid(value: &str) -> Result<ObjectId, MalformedObject> {
    ObjectId::try_parse(value.to_string())
        .ok_or_else(|| MalformedObject(format!("invalid object id '{value}'")))
}

// Format: "<unix-seconds> <+hhmm>"
fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, MalformedObject> {
    let (seconds, timezone) = value
        .split_once(' ')
        .ok_or_else(|| MalformedObject(format!("invalid date '{value}'")))?;

    let seconds = seconds
        .parse::<i64>()
        .map_err(|_| MalformedObject(format!("invalid timestamp '{seconds}'")))?;
    let offset = DateTime::parse_from_str(
        &format!("1970-01-01 00:00:00 {timezone}"),
        "%Y-%m-%d %H:%M:%S %z",
    )
    .map_err(|_| MalformedObject(format!("invalid timezone '{timezone}'")))?
    .offset()
    .to_owned();

    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| MalformedObject(format!("timestamp out of range '{seconds}'")))
}
