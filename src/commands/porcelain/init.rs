use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::{Error, IoResultExt, Result};
use std::fs;

impl Repository {
    /// Create `.gitlet` with the initial commit and `master` as the current branch
    pub fn init(&self) -> Result<()> {
        let metadata_path = self.metadata_path();

        if metadata_path.exists() {
            return Err(Error::AlreadyInitialized(self.path().to_path_buf()));
        }

        fs::create_dir_all(self.database().objects_path())
            .storage_context(|| "unable to create .gitlet/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .storage_context(|| "unable to create .gitlet/refs/heads directory")?;

        let initial_oid = self.database().store(&Commit::initial())?;
        let default_branch = BranchName::default_branch();

        self.refs().create_branch(&default_branch, &initial_oid)?;
        // HEAD goes last: its presence marks the repository as initialized
        self.refs().set_current_branch(&default_branch)?;

        tracing::info!(path = %self.path().display(), "initialized repository");

        Ok(())
    }
}
