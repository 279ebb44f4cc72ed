//! Working directory access
//!
//! All paths handed to the workspace are repository-relative. Writes replace
//! files atomically (temp file + rename), so a file is always either its old or
//! its new content.

use crate::areas::database::Database;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::errors::{Error, IoResultExt, Missing, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Name of the metadata directory, never treated as working-directory content
pub const METADATA_DIR: &str = ".gitlet";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Turn a user-supplied path into a clean repository-relative one
    ///
    /// Absolute paths must lie inside the repository. Paths escaping the root
    /// or pointing into the metadata directory do not name working files.
    /// Names that are not UTF-8 or hold control characters cannot be recorded
    /// in commits or the index and are rejected.
    pub fn normalize(&self, file_path: &Path) -> Result<PathBuf> {
        let relative = if file_path.is_absolute() {
            file_path
                .strip_prefix(&self.path)
                .map_err(|_| Error::FileNotFound(file_path.to_path_buf()))?
        } else {
            file_path
        };

        let mut normalized = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    let supported = part
                        .to_str()
                        .is_some_and(|name| !name.contains(char::is_control));
                    if !supported {
                        return Err(Error::UnsupportedPath(file_path.to_path_buf()));
                    }
                    normalized.push(part);
                }
                Component::CurDir => {}
                _ => return Err(Error::FileNotFound(file_path.to_path_buf())),
            }
        }

        if normalized.as_os_str().is_empty() || Self::is_ignored(&normalized) {
            return Err(Error::FileNotFound(file_path.to_path_buf()));
        }

        Ok(normalized)
    }

    fn is_ignored(path: &Path) -> bool {
        matches!(
            path.components().next(),
            Some(Component::Normal(name)) if name == METADATA_DIR
        )
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_dir(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_dir()
    }

    pub fn parse_blob(&self, file_path: &Path) -> Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Content of a working file; `FileNotFound` if it is missing or not a regular file
    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        self.read_file_if_exists(file_path)?
            .ok_or_else(|| Error::FileNotFound(file_path.to_path_buf()))
    }

    pub fn read_file_if_exists(&self, file_path: &Path) -> Result<Option<Bytes>> {
        let full_path = self.path.join(file_path);

        if !full_path.is_file() {
            return Ok(None);
        }

        match std::fs::read(&full_path) {
            Ok(content) => Ok(Some(Bytes::from(content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::StorageIo {
                context: format!("unable to read {}", full_path.display()),
                source: e,
            }),
        }
    }

    /// Regular files below `dir_path`, repository-relative and sorted
    pub fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>> {
        let full_path = self.path.join(dir_path);
        let mut files = Vec::new();

        for entry in WalkDir::new(&full_path) {
            let entry = entry.map_err(|e| Error::StorageIo {
                context: format!("unable to list {}", full_path.display()),
                source: e.into(),
            })?;

            if entry.file_type().is_file()
                && let Ok(relative) = entry.path().strip_prefix(&self.path)
                && !Self::is_ignored(relative)
            {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();

        Ok(files)
    }

    /// Replace a working file with `content`, creating parent directories
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> Result<()> {
        let full_path = self.path.join(file_path);
        let parent = full_path.parent().unwrap_or(self.path.as_ref());

        std::fs::create_dir_all(parent)
            .storage_context(|| format!("unable to create directory {}", parent.display()))?;

        let file_name = full_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let temp_path = parent.join(format!(".{file_name}.gitlet-{}", rand::random::<u32>()));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .storage_context(|| format!("unable to open {}", temp_path.display()))?;

        file.write_all(content)
            .and_then(|_| file.sync_all())
            .storage_context(|| format!("unable to write {}", temp_path.display()))?;

        std::fs::rename(&temp_path, &full_path)
            .storage_context(|| format!("unable to replace {}", full_path.display()))
    }

    /// Delete a working file if present and prune directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> Result<()> {
        let full_path = self.path.join(file_path);

        match std::fs::remove_file(&full_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(Error::StorageIo {
                    context: format!("unable to remove {}", full_path.display()),
                    source: e,
                });
            }
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(&self.path)
            && parent
                .read_dir()
                .storage_context(|| format!("unable to read {}", parent.display()))?
                .next()
                .is_none()
        {
            std::fs::remove_dir(parent)
                .storage_context(|| format!("unable to remove directory {}", parent.display()))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // Deletions run first so a directory can be replaced by a file (and the
    // other way around); writes follow in path order, parents created on demand.
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> Result<()> {
        for (file_path, _) in migration.actions_of(ActionType::Delete) {
            self.remove_file(file_path)?;
        }

        for action in [ActionType::Modify, ActionType::Add] {
            for (file_path, oid) in migration.actions_of(action) {
                let blob = database
                    .parse_object_as_blob(oid)?
                    .ok_or_else(|| Error::NotFound(Missing::Object(oid.clone())))?;

                self.write_file(file_path, blob.content())?;
            }
        }

        Ok(())
    }
}
