//! Repository error kinds
//!
//! Every core operation returns [`Result`]. Errors carry the kind of failure plus
//! the context needed to report it (a path, a branch name, a fingerprint), but
//! never preformatted user-facing text: rendering is the binary's job.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

/// What a `NotFound` error failed to find
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    /// No object with this fingerprint in the object store
    Object(ObjectId),
    /// The fingerprint exists but does not name a commit, or no commit has it
    Commit(String),
    /// No branch with this name
    Branch(String),
    /// A revision expression that resolved to nothing
    Revision(String),
    /// The commit does not track the given path
    FileInCommit { commit: ObjectId, path: PathBuf },
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Missing::Object(oid) => write!(f, "object {}", oid),
            Missing::Commit(name) => write!(f, "commit {}", name),
            Missing::Branch(name) => write!(f, "branch {}", name),
            Missing::Revision(name) => write!(f, "revision {}", name),
            Missing::FileInCommit { commit, path } => {
                write!(f, "file {} in commit {}", path.display(), commit)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a gitlet repository: {0}")]
    NotInitialized(PathBuf),

    #[error("a gitlet repository already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("{0} not found")]
    NotFound(Missing),

    #[error("file does not exist: {0}")]
    FileNotFound(PathBuf),

    #[error("file name must be UTF-8 without control characters: {0:?}")]
    UnsupportedPath(PathBuf),

    #[error("branch {0} already exists")]
    AlreadyExists(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("cannot delete the current branch {0}")]
    CannotDeleteCurrentBranch(String),

    #[error("short fingerprint {prefix} is ambiguous")]
    AmbiguousRevision {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("nothing staged to commit")]
    NothingToCommit,

    #[error("missing commit message")]
    MissingMessage,

    #[error("cannot remove {0}: file was not tracked or added")]
    NothingToRemove(PathBuf),

    #[error("file has not been modified since the last commit: {0}")]
    UnmodifiedFile(PathBuf),

    #[error("untracked files would be overwritten: {0:?}")]
    UntrackedFileConflict(Vec<PathBuf>),

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("corrupt index file {path}: {reason}")]
    CorruptIndex { path: PathBuf, reason: String },

    #[error("{context}: {source}")]
    StorageIo {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn corrupt_object(oid: &ObjectId, reason: impl Into<String>) -> Self {
        Error::CorruptObject {
            oid: oid.clone(),
            reason: reason.into(),
        }
    }

    pub fn corrupt_index(path: &Path, reason: impl Into<String>) -> Self {
        Error::CorruptIndex {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Attach context to raw filesystem failures, turning them into `StorageIo`
pub trait IoResultExt<T> {
    fn storage_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn storage_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|source| Error::StorageIo {
            context: context().into(),
            source,
        })
    }
}
