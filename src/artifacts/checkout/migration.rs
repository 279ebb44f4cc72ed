use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::diff::tree_diff::{TreeChangeType, TreeDiff};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    /// Write a file that is not on disk
    Add,
    /// Delete a file the target snapshot does not track
    Delete,
    /// Overwrite a file whose content differs from the target
    Modify,
}

/// Planned actions grouped by type; each path carries the blob involved
pub type ActionsSet = BTreeMap<ActionType, Vec<(PathBuf, ObjectId)>>;

/// The file system changes that turn the active snapshot into the target one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    actions: ActionsSet,
}

impl Migration {
    /// Plan the move from `active` to `target`
    ///
    /// Fails with `UntrackedFileConflict`, listing every offending path, when a
    /// file on disk that is neither tracked by `active` nor staged would be
    /// overwritten with different content.
    pub fn plan(
        workspace: &Workspace,
        index: &Index,
        active: &FileMap,
        target: &FileMap,
    ) -> Result<Self> {
        let is_protected =
            |path: &Path| !active.contains_key(path) && index.staged_blob(path).is_none();
        let mut migration = Migration::default();
        let mut conflicts = BTreeSet::new();

        for (path, oid) in target {
            // a file standing where the target needs a directory
            for ancestor in path.ancestors().skip(1) {
                if !ancestor.as_os_str().is_empty()
                    && workspace.is_file(ancestor)
                    && is_protected(ancestor)
                {
                    conflicts.insert(ancestor.to_path_buf());
                }
            }

            let up_to_date = workspace
                .read_file_if_exists(path)?
                .map(|content| &Blob::new(content).object_id() == oid);

            match up_to_date {
                Some(true) => {}
                Some(false) if is_protected(path.as_path()) => {
                    conflicts.insert(path.clone());
                }
                Some(false) => migration.record(ActionType::Modify, path, oid),
                None => {
                    // a directory standing where the target needs a file
                    if workspace.is_dir(path) {
                        conflicts.extend(
                            workspace
                                .list_files(path)?
                                .into_iter()
                                .filter(|file| is_protected(file.as_path())),
                        );
                    }
                    migration.record(ActionType::Add, path, oid);
                }
            }
        }

        for (path, change) in TreeDiff::compare(active, target).changes() {
            if let TreeChangeType::Deleted(oid) = change
                && workspace.is_file(path)
            {
                migration.record(ActionType::Delete, path, oid);
            }
        }

        if !conflicts.is_empty() {
            tracing::debug!(conflicts = conflicts.len(), "checkout refused");
            return Err(Error::UntrackedFileConflict(conflicts.into_iter().collect()));
        }

        tracing::debug!(
            add = migration.actions_of(ActionType::Add).count(),
            modify = migration.actions_of(ActionType::Modify).count(),
            delete = migration.actions_of(ActionType::Delete).count(),
            "planned migration"
        );

        Ok(migration)
    }

    fn record(&mut self, action: ActionType, path: &Path, oid: &ObjectId) {
        self.actions
            .entry(action)
            .or_default()
            .push((path.to_path_buf(), oid.clone()));
    }

    pub fn actions_of(&self, action: ActionType) -> impl Iterator<Item = &(PathBuf, ObjectId)> {
        self.actions.get(&action).into_iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.values().all(Vec::is_empty)
    }
}
