use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::log::rev_list::CommitGraph;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{MIN_ABBREV_LENGTH, OBJECT_ID_LENGTH};
use crate::errors::{Error, Missing, Result};
use regex::Regex;
use std::sync::LazyLock;

static PARENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PARENT_REGEX).expect("parent pattern is a valid regex"));
static ANCESTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ANCESTOR_REGEX).expect("ancestor pattern is a valid regex"));

/// A commit reference as typed by the user
///
/// Supports multiple formats:
/// - Branch names: `master`, `feature/login`
/// - `HEAD` and its alias `@`
/// - Full or abbreviated (4+ hex characters) commit ids, tried when no branch has that name
/// - Parent notation: `<revision>^` (e.g. `master^`, `HEAD^^`)
/// - Ancestor notation: `<revision>~<n>` (e.g. `HEAD~3`)
#[derive(Debug, Clone)]
pub enum Revision {
    /// A branch, `HEAD`, or a possibly abbreviated commit id
    Ref(BranchName),
    /// The Nth ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    /// Resolve to the id of an existing commit
    pub fn resolve(&self, repository: &Repository) -> Result<ObjectId> {
        let graph = repository.commit_graph();

        match self {
            Revision::Ref(name) if name.is_head() => repository.refs().read_head(),
            Revision::Ref(name) => {
                if let Some(oid) = repository.refs().read_branch(name)? {
                    return Ok(oid);
                }

                if Self::looks_like_oid(name.as_ref()) {
                    Self::resolve_oid(name.as_ref(), repository)
                } else {
                    Err(Error::NotFound(Missing::Revision(name.to_string())))
                }
            }
            Revision::Parent(base_revision) => {
                let oid = base_revision.resolve(repository)?;
                self.resolve_commit_parent(&graph, &oid)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = self.resolve_commit_parent(&graph, &oid)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_commit_parent(&self, graph: &CommitGraph, oid: &ObjectId) -> Result<ObjectId> {
        graph
            .resolve(oid)?
            .parent()
            .cloned()
            .ok_or_else(|| Error::NotFound(Missing::Revision(self.to_string())))
    }

    fn resolve_oid(prefix: &str, repository: &Repository) -> Result<ObjectId> {
        let prefix = prefix.to_ascii_lowercase();

        if prefix.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(prefix.clone())
                .ok_or_else(|| Error::NotFound(Missing::Revision(prefix.clone())))?;
            repository.commit_graph().resolve(&oid)?;

            return Ok(oid);
        }

        // only commits are candidates; a blob sharing the prefix is not ambiguous
        let mut commit_matches = Vec::new();
        for oid in repository.database().find_objects_by_prefix(&prefix)? {
            match repository.database().object_type(&oid) {
                Ok(ObjectType::Commit) => commit_matches.push(oid),
                Ok(_) | Err(Error::CorruptObject { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        match commit_matches.len() {
            0 => Err(Error::NotFound(Missing::Revision(prefix))),
            1 => Ok(commit_matches.remove(0)),
            _ => Err(Error::AmbiguousRevision {
                prefix,
                candidates: commit_matches,
            }),
        }
    }

    pub fn try_parse(revision: &str) -> Result<Revision> {
        if let Some(caps) = PARENT.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ANCESTOR.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .map_err(|_| Error::NotFound(Missing::Revision(revision.to_string())))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let branch_name = BranchName::try_parse(resolved_name)?;
            Ok(Revision::Ref(branch_name))
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        s.len() >= MIN_ABBREV_LENGTH
            && s.len() <= OBJECT_ID_LENGTH
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
