use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Missing, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// HEAD already named this branch; nothing was touched
    AlreadyOnBranch,
    /// The working directory now matches the branch tip
    Switched { branch: BranchName, oid: ObjectId },
}

impl Repository {
    /// Make `name` the current branch and its tip the working directory content
    pub fn checkout_branch(&self, name: &str) -> Result<CheckoutOutcome> {
        let mut index = self.load_index()?;

        let branch = BranchName::try_parse(name)
            .map_err(|_| Error::NotFound(Missing::Branch(name.to_string())))?;
        let target_oid = self
            .refs()
            .read_branch(&branch)?
            .ok_or_else(|| Error::NotFound(Missing::Branch(name.to_string())))?;

        if self.refs().is_current_branch(&branch)? {
            return Ok(CheckoutOutcome::AlreadyOnBranch);
        }

        let (_, active) = self.head_commit()?;
        let target = self.commit_graph().resolve(&target_oid)?;

        self.switch_snapshot(&mut index, active.files(), target.files(), |refs| {
            refs.set_current_branch(&branch)
        })?;

        tracing::info!(branch = %branch, oid = %target_oid, "checkout");

        Ok(CheckoutOutcome::Switched {
            branch,
            oid: target_oid,
        })
    }

    /// Restore one file from a commit (HEAD when `commit_ref` is `None`)
    ///
    /// Neither HEAD nor the staging index change.
    pub fn checkout_file(&self, commit_ref: Option<&str>, path: &Path) -> Result<()> {
        self.ensure_initialized()?;

        let oid = match commit_ref {
            Some(commit_ref) => self.resolve_revision(commit_ref)?,
            None => self.refs().read_head()?,
        };
        let commit = self.commit_graph().resolve(&oid)?;

        let missing_file = || {
            Error::NotFound(Missing::FileInCommit {
                commit: oid.clone(),
                path: path.to_path_buf(),
            })
        };
        let path = self.workspace().normalize(path).map_err(|_| missing_file())?;
        let blob_oid = commit.blob_for(&path).ok_or_else(missing_file)?;
        let blob = self
            .database()
            .parse_object_as_blob(blob_oid)?
            .ok_or_else(|| Error::NotFound(Missing::Object(blob_oid.clone())))?;

        self.workspace().write_file(&path, blob.content())?;
        tracing::info!(path = %path.display(), oid = %oid, "checkout file");

        Ok(())
    }

    /// Move the working directory from `active` to `target` and point a ref at it
    ///
    /// Untracked files are never clobbered. The cleared index is written before
    /// anything else changes but only replaces the live one once `move_ref` succeeds.
    pub(crate) fn switch_snapshot(
        &self,
        index: &mut Index,
        active: &FileMap,
        target: &FileMap,
        move_ref: impl FnOnce(&Refs) -> Result<()>,
    ) -> Result<()> {
        let migration = Migration::plan(self.workspace(), index, active, target)?;

        index.clear();
        let update = index.prepare_updates()?;

        if !migration.is_empty() {
            self.workspace().apply_migration(&migration, self.database())?;
        }
        move_ref(self.refs())?;

        update.apply()
    }
}
