//! Repository status
//!
//! - `status_info`: the branches and staged changes reported by `status`

pub mod status_info;
