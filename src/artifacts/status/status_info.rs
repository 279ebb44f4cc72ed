use crate::artifacts::branch::branch_name::BranchName;
use std::path::PathBuf;

/// One branch as listed by `status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
    pub name: BranchName,
    pub is_current: bool,
}

/// Branches and staged changes, each list in lexicographic order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub branches: Vec<BranchListing>,
    pub staged: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

impl StatusReport {
    pub fn current_branch(&self) -> Option<&BranchName> {
        self.branches
            .iter()
            .find(|listing| listing.is_current)
            .map(|listing| &listing.name)
    }

    /// Nothing staged for addition or removal
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }
}
