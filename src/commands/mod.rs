//! Command implementations
//!
//! - `porcelain`: User-facing version control operations (init, add, commit, checkout, ...)

pub mod porcelain;
