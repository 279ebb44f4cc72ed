//! Porcelain operations on a [`Repository`](crate::areas::repository::Repository)
//!
//! Each operation loads what it needs from disk, validates every precondition
//! before mutating anything, and returns a structured outcome. Rendering the
//! outcome for humans is left to the binary.
//!
//! - `init`: Create a repository
//! - `add` / `rm`: Stage additions and removals
//! - `commit`: Record the staged snapshot
//! - `checkout`: Switch branches or restore a single file
//! - `branch`: Create, list and delete branches
//! - `reset`: Move the current branch and working directory to any commit
//! - `status`: Branches and staged changes
//! - `log`: Branch history, global log and search by message

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod reset;
pub mod rm;
pub mod status;
