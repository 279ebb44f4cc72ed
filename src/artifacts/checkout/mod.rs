//! Working directory reconciliation
//!
//! Moving the working directory from the active snapshot to a target snapshot
//! happens in two phases:
//!
//! 1. [`migration::Migration::plan`] compares the two snapshots with the files
//!    on disk, decides which paths to write or delete, and refuses the whole
//!    move if it would overwrite a file gitlet does not track
//! 2. [`crate::areas::workspace::Workspace::apply_migration`] performs the planned
//!    deletions, then the writes
//!
//! Nothing is touched on disk until planning has succeeded.

pub mod migration;
