//! Commit history traversal
//!
//! - `rev_list`: the commit graph, a lazy walk from a commit back to the root
//!   along parent links, and reachability checks
//! - `log_entry`: one commit as reported by `log`, `global-log` and `find`
//!
//! History is linear (every commit has at most one parent) and acyclic by
//! construction: a commit can only name a parent that already exists.

pub mod log_entry;
pub mod rev_list;
