//! Gitlet data structures and algorithms
//!
//! - `branch`: Branch names and revision parsing
//! - `checkout`: Planning working directory changes for checkout and reset
//! - `diff`: Snapshot comparison
//! - `index`: Staging index file format
//! - `log`: Commit graph traversal
//! - `objects`: Object types (blob, commit)
//! - `status`: Status report types

pub mod branch;
pub mod checkout;
pub mod diff;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
