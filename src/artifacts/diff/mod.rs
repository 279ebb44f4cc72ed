//! Snapshot comparison
//!
//! - `tree_diff`: which paths were added, deleted or modified between two
//!   commit snapshots

pub mod tree_diff;
