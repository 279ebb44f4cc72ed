use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Missing, Result};
use derive_new::new;

/// Read-only view of the commit DAG stored in the object database
#[derive(Debug, Clone, Copy, new)]
pub struct CommitGraph<'d> {
    database: &'d Database,
}

impl<'d> CommitGraph<'d> {
    /// Load a commit, failing with `NotFound` if the id is unknown or not a commit
    pub fn resolve(&self, oid: &ObjectId) -> Result<Commit> {
        match self.database.parse_object_as_commit(oid) {
            Ok(Some(commit)) => Ok(commit),
            Ok(None) | Err(Error::NotFound(Missing::Object(_))) => {
                Err(Error::NotFound(Missing::Commit(oid.to_string())))
            }
            Err(e) => Err(e),
        }
    }

    /// Walk from `start` back to the root commit, most recent first
    ///
    /// The walk is lazy; cloning the returned iterator restarts from the same
    /// position.
    pub fn ancestors(&self, start: &ObjectId) -> RevList<'d> {
        RevList {
            graph: *self,
            next_oid: Some(start.clone()),
        }
    }

    /// Whether `ancestor` is reachable from `descendant` via parent links
    ///
    /// A commit is its own ancestor.
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> Result<bool> {
        for entry in self.ancestors(descendant) {
            let (oid, _) = entry?;
            if &oid == ancestor {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Every commit in the object database, in id order
    ///
    /// Objects that cannot be decoded are logged and skipped.
    pub fn all_commits(&self) -> Result<Vec<(ObjectId, Commit)>> {
        let mut commits = Vec::new();

        for oid in self.database.list_objects()? {
            match self.database.parse_object_as_commit(&oid) {
                Ok(Some(commit)) => commits.push((oid, commit)),
                Ok(None) => {}
                Err(e @ Error::CorruptObject { .. }) => {
                    tracing::warn!(oid = %oid, error = %e, "skipping unreadable object");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(commits)
    }
}

/// Lazy iterator over a commit and its ancestors
///
/// A broken parent link is yielded once as an error, after which the
/// iteration ends.
#[derive(Debug, Clone)]
pub struct RevList<'d> {
    graph: CommitGraph<'d>,
    next_oid: Option<ObjectId>,
}

impl Iterator for RevList<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_oid.take()?;

        match self.graph.resolve(&commit_oid) {
            Ok(commit) => {
                // move to the parent commit for the next iteration
                self.next_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
