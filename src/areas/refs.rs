//! Branch references and HEAD
//!
//! Branches are text files under `.gitlet/refs/heads/<name>` holding the
//! 40-character id of the branch tip. HEAD is a symbolic reference
//! (`ref: refs/heads/<name>`) naming the current branch.
//!
//! Every update replaces one file atomically: the new content is written to a
//! hidden sibling temp file, synced, and renamed over the old file. There is no
//! locking against concurrent processes.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoResultExt, Missing, Result};
use derive_new::new;
use regex::Regex;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

static SYMREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SYMREF_REGEX).expect("symref pattern is a valid regex"));

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository metadata directory (typically `.gitlet`)
    path: Box<Path>,
}

/// Content of a reference file
#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    /// Symbolic reference to a branch
    SymRef(BranchName),
    /// Direct object id
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> Result<Option<SymRefOrOid>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::StorageIo {
                    context: format!("unable to read ref {}", path.display()),
                    source: e,
                });
            }
        };
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        if let Some(symref_match) = SYMREF.captures(content) {
            return Ok(Some(SymRefOrOid::SymRef(BranchName::try_parse(
                &symref_match[1],
            )?)));
        }

        ObjectId::try_parse(content.to_string())
            .map(|oid| Some(SymRefOrOid::Oid(oid)))
            .ok_or_else(|| Error::StorageIo {
                context: format!("unable to parse ref {}", path.display()),
                source: std::io::Error::new(
                    ErrorKind::InvalidData,
                    format!("not an object id: {content:?}"),
                ),
            })
    }
}

impl Refs {
    /// Name of the branch HEAD points to
    pub fn current_branch(&self) -> Result<BranchName> {
        match SymRefOrOid::read_symref_or_oid(&self.head_path())? {
            Some(SymRefOrOid::SymRef(branch_name)) => Ok(branch_name),
            Some(SymRefOrOid::Oid(oid)) => Err(Error::NotFound(Missing::Branch(format!(
                "{HEAD_REF_NAME} (detached at {})",
                oid.to_short_oid()
            )))),
            None => Err(Error::NotFound(Missing::Branch(HEAD_REF_NAME.to_string()))),
        }
    }

    /// Point HEAD at an existing branch
    pub fn set_current_branch(&self, branch_name: &BranchName) -> Result<()> {
        if !self.branch_path(branch_name).is_file() {
            return Err(Error::NotFound(Missing::Branch(branch_name.to_string())));
        }

        self.update_ref_file(
            &self.head_path(),
            &format!("ref: refs/heads/{branch_name}"),
        )?;
        tracing::debug!(branch = %branch_name, "moved HEAD");

        Ok(())
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Id of the commit HEAD resolves to
    ///
    /// A direct id in HEAD is accepted even though no operation writes one.
    pub fn read_head(&self) -> Result<ObjectId> {
        match SymRefOrOid::read_symref_or_oid(&self.head_path())? {
            Some(SymRefOrOid::SymRef(branch_name)) => self
                .read_branch(&branch_name)?
                .ok_or_else(|| Error::NotFound(Missing::Branch(branch_name.to_string()))),
            Some(SymRefOrOid::Oid(oid)) => Ok(oid),
            None => Err(Error::NotFound(Missing::Branch(HEAD_REF_NAME.to_string()))),
        }
    }

    /// Tip of a branch, `None` when the branch does not exist
    pub fn read_branch(&self, branch_name: &BranchName) -> Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);

        match SymRefOrOid::read_symref_or_oid(&branch_path)? {
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            // only HEAD may be symbolic
            Some(SymRefOrOid::SymRef(_)) => Err(Error::StorageIo {
                context: format!("unable to parse ref {}", branch_path.display()),
                source: std::io::Error::new(
                    ErrorKind::InvalidData,
                    "branch file holds a symbolic ref",
                ),
            }),
            None => Ok(None),
        }
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> Result<()> {
        let branch_path = self.branch_path(branch_name);

        // refuse names already taken, either as a branch or as a branch namespace
        if branch_path.exists() {
            return Err(Error::AlreadyExists(branch_name.to_string()));
        }

        self.update_ref_file(&branch_path, oid.as_ref())?;
        tracing::debug!(branch = %branch_name, oid = %oid, "created branch");

        Ok(())
    }

    /// Move an existing branch to a new commit
    pub fn set_branch_target(&self, branch_name: &BranchName, oid: &ObjectId) -> Result<()> {
        let branch_path = self.branch_path(branch_name);

        if !branch_path.is_file() {
            return Err(Error::NotFound(Missing::Branch(branch_name.to_string())));
        }

        self.update_ref_file(&branch_path, oid.as_ref())?;
        tracing::debug!(branch = %branch_name, oid = %oid, "updated branch");

        Ok(())
    }

    /// Remove a branch pointer, returning the commit it pointed to
    pub fn delete_branch(&self, branch_name: &BranchName) -> Result<ObjectId> {
        let oid = self
            .read_branch(branch_name)?
            .ok_or_else(|| Error::NotFound(Missing::Branch(branch_name.to_string())))?;

        let branch_path = self.branch_path(branch_name);
        std::fs::remove_file(&branch_path)
            .storage_context(|| format!("unable to delete branch {}", branch_path.display()))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %branch_name, oid = %oid, "deleted branch");

        Ok(oid)
    }

    /// All branch names in lexicographic order
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = Vec::new();

        for entry in WalkDir::new(&heads_path) {
            let entry = entry.map_err(|e| Error::StorageIo {
                context: format!("unable to list branches in {}", heads_path.display()),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative_path) = entry.path().strip_prefix(&heads_path) else {
                continue;
            };

            // leftover temp files are hidden and never parse as branch names
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if let Ok(branch_name) = BranchName::try_parse(name) {
                branches.push(branch_name);
            }
        }

        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> Result<()> {
        let parent = path.parent().unwrap_or(self.path.as_ref());
        std::fs::create_dir_all(parent).storage_context(|| {
            format!("unable to create ref directory {}", parent.display())
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let temp_path = parent.join(format!(".{file_name}.tmp"));

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .storage_context(|| format!("unable to open ref file {}", temp_path.display()))?;

        ref_file
            .write_all(format!("{raw_ref}\n").as_bytes())
            .and_then(|_| ref_file.sync_all())
            .storage_context(|| format!("unable to write ref file {}", temp_path.display()))?;

        std::fs::rename(&temp_path, path)
            .storage_context(|| format!("unable to replace ref {}", path.display()))
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent
                .read_dir()
                .storage_context(|| format!("unable to read {}", parent.display()))?
                .next()
                .is_none()
        {
            std::fs::remove_dir(parent).storage_context(|| {
                format!("unable to remove empty branch directory {}", parent.display())
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path().join(branch_name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
