//! Repository areas
//!
//! - `database`: Content-addressed object store for blobs and commits
//! - `index`: Staging index of additions and removals
//! - `refs`: Branch pointers and HEAD
//! - `repository`: Handle tying the areas of one repository together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
