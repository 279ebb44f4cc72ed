use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Missing, Result};
use std::path::Path;

/// What `add` did to the staging index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// The file's content was stored and staged for addition
    Staged(ObjectId),
    /// The same content was already staged
    AlreadyStaged,
    /// The file matches HEAD again, so its staged addition was dropped
    Unstaged,
    /// The file matches HEAD again, or was missing and rewritten from HEAD, so its
    /// staged removal was cancelled
    Restored,
}

impl Repository {
    pub fn add(&self, path: &Path) -> Result<StageOutcome> {
        let mut index = self.load_index()?;

        let path = self.workspace().normalize(path)?;

        if index.is_staged_for_removal(&path) && !self.workspace().is_file(&path) {
            return self.restore_removed(&mut index, &path);
        }

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = blob.object_id();
        let (_, head) = self.head_commit()?;

        let outcome = if head.blob_for(&path) == Some(&blob_id) {
            if index.unstage_removal(&path) {
                StageOutcome::Restored
            } else if index.unstage(&path).is_some() {
                StageOutcome::Unstaged
            } else {
                return Err(Error::UnmodifiedFile(path));
            }
        } else if index.staged_blob(&path) == Some(&blob_id) {
            StageOutcome::AlreadyStaged
        } else {
            self.database().store(&blob)?;
            index.stage(path.clone(), blob_id.clone());
            StageOutcome::Staged(blob_id)
        };

        index.write_updates()?;
        tracing::info!(path = %path.display(), ?outcome, "add");

        Ok(outcome)
    }

    /// Cancel a staged removal whose file is gone, writing it back from HEAD
    fn restore_removed(&self, index: &mut Index, path: &Path) -> Result<StageOutcome> {
        let (_, head) = self.head_commit()?;
        let blob_oid = head
            .blob_for(path)
            .ok_or_else(|| Error::FileNotFound(path.to_path_buf()))?;
        let blob = self
            .database()
            .parse_object_as_blob(blob_oid)?
            .ok_or_else(|| Error::NotFound(Missing::Object(blob_oid.clone())))?;

        index.unstage_removal(path);
        let update = index.prepare_updates()?;
        self.workspace().write_file(path, blob.content())?;
        update.apply()?;

        tracing::info!(path = %path.display(), "add restored removed file");

        Ok(StageOutcome::Restored)
    }
}
