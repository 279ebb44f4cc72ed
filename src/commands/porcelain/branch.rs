use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::status_info::BranchListing;
use crate::errors::{Error, Missing, Result};

impl Repository {
    /// Create a branch pointing at HEAD's commit; HEAD stays where it is
    pub fn branch(&self, name: &str) -> Result<()> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name)?;
        if branch.is_head() {
            return Err(Error::InvalidBranchName(HEAD_REF_NAME.to_string()));
        }

        let head_oid = self.refs().read_head()?;
        self.refs().create_branch(&branch, &head_oid)?;

        tracing::info!(branch = %branch, oid = %head_oid, "branch");

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the object store
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name)
            .map_err(|_| Error::NotFound(Missing::Branch(name.to_string())))?;
        if self.refs().is_current_branch(&branch)? {
            return Err(Error::CannotDeleteCurrentBranch(name.to_string()));
        }

        let oid = self.refs().delete_branch(&branch)?;
        tracing::info!(branch = %branch, oid = %oid, "delete branch");

        Ok(())
    }

    /// All branches in lexicographic order, the current one marked
    pub fn branches(&self) -> Result<Vec<BranchListing>> {
        self.ensure_initialized()?;

        let current = self.refs().current_branch()?;

        Ok(self
            .refs()
            .list_branches()?
            .into_iter()
            .map(|name| BranchListing {
                is_current: name == current,
                name,
            })
            .collect())
    }
}
