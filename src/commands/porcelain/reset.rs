use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub fn reset(&self, commit_ref: &str) -> Result<ObjectId> {
        let mut index = self.load_index()?;

        let target_oid = self.resolve_revision(commit_ref)?;
        let target = self.commit_graph().resolve(&target_oid)?;
        let branch = self.refs().current_branch()?;

        let (active_oid, active) = self.head_commit()?;
        let rewinds = self.commit_graph().is_ancestor(&target_oid, &active_oid)?;

        self.switch_snapshot(&mut index, active.files(), target.files(), |refs| {
            refs.set_branch_target(&branch, &target_oid)
        })?;

        tracing::info!(branch = %branch, oid = %target_oid, rewinds, "reset");

        Ok(target_oid)
    }
}
