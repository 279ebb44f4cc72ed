use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};

/// A freshly recorded commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub oid: ObjectId,
    pub commit: Commit,
}

impl Repository {
    /// Snapshot HEAD plus the staged changes and advance the current branch
    pub fn commit(&self, message: &str) -> Result<CommitSummary> {
        let mut index = self.load_index()?;

        let message = message.trim();
        if message.is_empty() {
            return Err(Error::MissingMessage);
        }
        if index.is_empty() {
            return Err(Error::NothingToCommit);
        }

        let branch = self.refs().current_branch()?;
        let (parent, head) = self.head_commit()?;

        let files = index.apply_to(head.files());
        let commit = Commit::new(
            Some(parent),
            self.commit_timestamp(),
            message.to_string(),
            files,
        );

        // staged blobs are already stored; the commit must be durable before the branch moves
        let oid = self.database().store(&commit)?;

        index.clear();
        let update = index.prepare_updates()?;
        self.refs().set_branch_target(&branch, &oid)?;
        update.apply()?;

        tracing::info!(
            oid = %oid,
            branch = %branch,
            files = commit.files().len(),
            message = commit.short_message(),
            "commit"
        );

        Ok(CommitSummary { oid, commit })
    }
}
