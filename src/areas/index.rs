//! Staging index
//!
//! The index records the changes the next commit will make on top of HEAD's
//! snapshot:
//!
//! - `additions`: path -> blob id, the content captured when the path was added
//! - `removals`: paths that the next commit will stop tracking
//!
//! A path is never in both collections. The index is persisted to
//! `.gitlet/index` (see [`crate::artifacts::index`] for the file format) by
//! writing a temporary file and renaming it over the old one.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{self, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{CHECKSUM_SIZE, HEADER_SIZE};
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoResultExt, Result};
use fake::rand;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    /// Files staged for addition mapped by path
    additions: BTreeMap<PathBuf, ObjectId>,
    /// Files staged for removal
    removals: BTreeSet<PathBuf>,
    /// Set when the in-memory state differs from what was last loaded or written
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk, replacing the in-memory state
    ///
    /// A missing or empty index file is an empty index.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        let index_bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(Error::StorageIo {
                    context: format!("unable to read index {}", self.path.display()),
                    source: e,
                });
            }
        };

        if index_bytes.is_empty() {
            return Ok(());
        }

        self.parse(index_bytes)
            .map_err(|reason| Error::corrupt_index(&self.path, reason))?;

        tracing::trace!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "loaded index"
        );

        Ok(())
    }

    fn parse(&mut self, index_bytes: Vec<u8>) -> std::result::Result<(), String> {
        if index_bytes.len() < HEADER_SIZE + CHECKSUM_SIZE {
            return Err(String::from("file is too short"));
        }

        let mut reader = Checksum::new(Cursor::new(index_bytes));
        let header_bytes = reader.read(HEADER_SIZE).map_err(unexpected_end)?;
        let header = IndexHeader::deserialize(&header_bytes)?;

        for _ in 0..header.additions_count {
            let entry = IndexEntry::read_from(&mut reader).map_err(unexpected_end)?;
            self.additions.insert(entry.name, entry.oid);
        }

        for _ in 0..header.removals_count {
            let path = index_entry::read_path(&mut reader).map_err(unexpected_end)?;
            self.removals.insert(path);
        }

        if !reader.verify().map_err(unexpected_end)? {
            return Err(String::from("checksum does not match value stored on disk"));
        }

        if self
            .removals
            .iter()
            .any(|path| self.additions.contains_key(path))
        {
            return Err(String::from("path staged for both addition and removal"));
        }

        Ok(())
    }

    /// Persist the index if it changed since it was loaded
    pub fn write_updates(&mut self) -> Result<()> {
        self.prepare_updates()?.apply()?;
        self.changed = false;

        Ok(())
    }

    /// Write the new index next to the live one without replacing it yet
    ///
    /// The live index only changes when the returned update is applied; dropping
    /// the update discards the written file.
    pub fn prepare_updates(&mut self) -> Result<IndexUpdate> {
        if !self.changed {
            return Ok(IndexUpdate::unchanged(self.path()));
        }

        let index_bytes = self.serialize().storage_context(|| {
            format!("unable to encode index {}", self.path.display())
        })?;

        let index_dir = self.path.parent().unwrap_or(Path::new("."));
        let temp_path = index_dir.join(format!("index.tmp-{}", rand::random::<u32>()));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .storage_context(|| format!("unable to open index file {}", temp_path.display()))?;
        let update = IndexUpdate {
            path: self.path.clone(),
            temp_path: Some(temp_path),
        };

        file.write_all(&index_bytes)
            .and_then(|_| file.sync_all())
            .storage_context(|| format!("unable to write index file {}", update.describe()))?;

        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "prepared index"
        );

        Ok(update)
    }

    fn serialize(&self) -> std::io::Result<Vec<u8>> {
        let mut writer = Checksum::new(Vec::new());

        let header = IndexHeader::new(
            count(self.additions.len())?,
            count(self.removals.len())?,
        );
        writer.write(&header.serialize()?)?;

        for (path, oid) in &self.additions {
            IndexEntry::new(path.clone(), oid.clone()).write_to(&mut writer)?;
        }

        for path in &self.removals {
            index_entry::write_path(path, &mut writer)?;
        }

        writer.write_checksum()?;

        Ok(writer.into_inner())
    }

    /// Stage `path` for addition with the given blob, cancelling a staged removal
    pub fn stage(&mut self, path: PathBuf, oid: ObjectId) {
        self.changed |= self.removals.remove(&path);

        if self.additions.get(&path) != Some(&oid) {
            self.additions.insert(path, oid);
            self.changed = true;
        }
    }

    /// Drop a staged addition, returning the blob that was staged
    pub fn unstage(&mut self, path: &Path) -> Option<ObjectId> {
        let removed = self.additions.remove(path);
        self.changed |= removed.is_some();

        removed
    }

    /// Stage `path` for removal, dropping any staged addition
    pub fn stage_removal(&mut self, path: PathBuf) {
        self.changed |= self.additions.remove(&path).is_some();
        self.changed |= self.removals.insert(path);
    }

    /// Cancel a staged removal; returns whether the path was staged for removal
    pub fn unstage_removal(&mut self, path: &Path) -> bool {
        let removed = self.removals.remove(path);
        self.changed |= removed;

        removed
    }

    pub fn staged_blob(&self, path: &Path) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.additions.clear();
        self.removals.clear();
    }

    /// The snapshot the next commit would record on top of `base`
    pub fn apply_to(&self, base: &FileMap) -> FileMap {
        let mut files = base.clone();

        for (path, oid) in &self.additions {
            files.insert(path.clone(), oid.clone());
        }
        for path in &self.removals {
            files.remove(path);
        }

        files
    }
}

/// A fully written index file waiting to replace the live one
#[derive(Debug)]
#[must_use = "the live index only changes once the update is applied"]
pub struct IndexUpdate {
    path: Box<Path>,
    temp_path: Option<PathBuf>,
}

impl IndexUpdate {
    fn unchanged(path: &Path) -> Self {
        IndexUpdate {
            path: path.into(),
            temp_path: None,
        }
    }

    /// Move the written file over the live index
    pub fn apply(mut self) -> Result<()> {
        let Some(temp_path) = self.temp_path.take() else {
            return Ok(());
        };

        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            // the temp file is ours to clean up once it can no longer be applied
            self.temp_path = Some(temp_path);
            return Err(Error::StorageIo {
                context: format!("unable to replace index {}", self.path.display()),
                source: e,
            });
        }

        tracing::debug!(path = %self.path.display(), "wrote index");

        Ok(())
    }

    fn describe(&self) -> String {
        self.temp_path
            .as_deref()
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

impl Drop for IndexUpdate {
    fn drop(&mut self) {
        if let Some(temp_path) = self.temp_path.take()
            && let Err(e) = std::fs::remove_file(&temp_path)
            && e.kind() != ErrorKind::NotFound
        {
            tracing::warn!(path = %temp_path.display(), error = %e, "unable to discard index update");
        }
    }
}

fn count(len: usize) -> std::io::Result<u32> {
    u32::try_from(len).map_err(|_| std::io::Error::other("too many index entries"))
}

fn unexpected_end(error: std::io::Error) -> String {
    match error.kind() {
        ErrorKind::UnexpectedEof => String::from("unexpected end-of-file while reading index"),
        _ => error.to_string(),
    }
}
