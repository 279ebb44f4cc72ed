use crate::areas::repository::Repository;
use crate::errors::{Error, Result};
use std::path::Path;

impl Repository {
    /// Unstage a staged file, or stage a tracked file for removal and delete it
    ///
    /// A file that was only staged stays on disk.
    pub fn remove(&self, path: &Path) -> Result<()> {
        let mut index = self.load_index()?;

        let path = self
            .workspace()
            .normalize(path)
            .map_err(|_| Error::NothingToRemove(path.to_path_buf()))?;
        let (_, head) = self.head_commit()?;

        let was_staged = index.unstage(&path).is_some();
        let is_tracked = head.tracks(&path);

        if !was_staged && !is_tracked {
            return Err(Error::NothingToRemove(path));
        }

        if is_tracked {
            index.stage_removal(path.clone());
        }
        let update = index.prepare_updates()?;

        if is_tracked {
            self.workspace().remove_file(&path)?;
        }
        update.apply()?;

        tracing::info!(path = %path.display(), was_staged, is_tracked, "rm");

        Ok(())
    }
}
