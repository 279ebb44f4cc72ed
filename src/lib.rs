//! A single-user, local version-control engine
//!
//! `gitlet` tracks snapshots of a working directory in a content-addressed
//! object store, links them into a commit history, and reconciles the working
//! directory with any commit on demand.
//!
//! - [`areas`]: the on-disk parts of a repository (objects, index, refs, working directory)
//! - [`artifacts`]: the data types and algorithms over them
//! - [`commands`]: porcelain operations on [`Repository`]
//! - [`errors`]: the [`Error`] kinds every operation can fail with

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use errors::{Error, Missing, Result};
