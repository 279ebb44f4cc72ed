use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{METADATA_DIR, Workspace};
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::rev_list::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoResultExt, Result};
use chrono::{DateTime, FixedOffset, Timelike};
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Environment variable fixing the timestamp recorded by `commit`
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

/// Handle on one repository: its working directory plus the `.gitlet` areas
///
/// Building a handle touches nothing on disk beyond resolving the root; every
/// porcelain operation checks that the repository is initialized first.
pub struct Repository {
    path: Box<Path>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path) -> Result<Self> {
        // a missing root is only created by `init`
        let path = if path.exists() {
            path.canonicalize()
        } else {
            std::path::absolute(path)
        }
        .storage_context(|| format!("unable to resolve {}", path.display()))?;
        let metadata_path = path.join(METADATA_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(metadata_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> Box<Path> {
        self.path.join(METADATA_DIR).into_boxed_path()
    }

    pub fn index(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn commit_graph(&self) -> CommitGraph<'_> {
        CommitGraph::new(&self.database)
    }

    pub fn is_initialized(&self) -> bool {
        self.refs.head_path().is_file()
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::NotInitialized(self.path.to_path_buf()))
        }
    }

    /// Load the staging index from disk and hand it out for the operation
    pub(crate) fn load_index(&self) -> Result<RefMut<'_, Index>> {
        self.ensure_initialized()?;

        let mut index = self.index();
        index.rehydrate()?;

        Ok(index)
    }

    /// Id and content of the commit HEAD points to
    pub fn head_commit(&self) -> Result<(ObjectId, Commit)> {
        let oid = self.refs.read_head()?;
        let commit = self.commit_graph().resolve(&oid)?;

        Ok((oid, commit))
    }

    /// Resolve a commit reference (branch, `HEAD`, abbreviated id, `^`, `~N`)
    pub fn resolve_revision(&self, revision: &str) -> Result<ObjectId> {
        Revision::try_parse(revision)?.resolve(self)
    }

    /// Timestamp for a new commit
    ///
    /// `GITLET_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) overrides the clock.
    pub(crate) fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        let fixed = std::env::var(COMMIT_DATE_ENV).ok().and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .inspect_err(|e| {
                    tracing::warn!(value = %date_str, error = %e, "ignoring invalid commit date")
                })
                .ok()
        });

        fixed.unwrap_or_else(|| {
            let now = chrono::Local::now().fixed_offset();
            now.with_nanosecond(0).unwrap_or(now)
        })
    }
}
