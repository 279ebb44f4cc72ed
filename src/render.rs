//! Terminal rendering of command results and errors

use gitlet::artifacts::log::log_entry::LogEntry;
use gitlet::artifacts::status::status_info::{BranchListing, StatusReport};
use gitlet::{Error, Missing};
use std::io::{self, Write};

#[derive(Debug, thiserror::Error)]
#[error("No such branch exists, and no such file in the current commit.")]
pub struct NoSuchBranchOrFile;

#[derive(Debug, thiserror::Error)]
#[error("Incorrect operands.")]
pub struct IncorrectOperands;

pub fn status(out: &mut impl Write, report: &StatusReport) -> io::Result<()> {
    writeln!(out, "=== Branches ===")?;
    branches(out, &report.branches)?;
    writeln!(out)?;

    writeln!(out, "=== Staged Files ===")?;
    for path in &report.staged {
        writeln!(out, "{}", path.display())?;
    }
    writeln!(out)?;

    writeln!(out, "=== Files Marked for Removal ===")?;
    for path in &report.removed {
        writeln!(out, "{}", path.display())?;
    }
    writeln!(out)
}

pub fn branches(out: &mut impl Write, listings: &[BranchListing]) -> io::Result<()> {
    for listing in listings {
        let marker = if listing.is_current { "*" } else { "" };
        writeln!(out, "{marker}{}", listing.name)?;
    }

    Ok(())
}

pub fn log(out: &mut impl Write, entries: &[LogEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "===")?;
        writeln!(out, "Commit {}", entry.oid)?;
        writeln!(out, "{}", entry.commit.readable_timestamp())?;
        writeln!(out, "{}", entry.commit.message())?;
        writeln!(out)?;
    }

    Ok(())
}

pub fn error(error: &Error) -> String {
    match error {
        Error::NotInitialized(_) => "Not in an initialized gitlet directory.".to_string(),
        Error::AlreadyInitialized(_) => {
            "A gitlet version control system already exists in the current directory.".to_string()
        }
        Error::FileNotFound(_) => "File does not exist.".to_string(),
        Error::UnsupportedPath(_) => {
            "File names must be UTF-8 and free of control characters.".to_string()
        }
        Error::UnmodifiedFile(_) => "File has not been modified since the last commit.".to_string(),
        Error::NothingToRemove(_) => "No reason to remove the file.".to_string(),
        Error::NothingToCommit => "No changes added to the commit.".to_string(),
        Error::MissingMessage => "Please enter a commit message.".to_string(),
        Error::NotFound(Missing::Branch(_)) => "No such branch exists.".to_string(),
        Error::NotFound(Missing::Commit(_) | Missing::Revision(_)) => {
            "No commit with that id exists.".to_string()
        }
        Error::NotFound(Missing::FileInCommit { .. }) => {
            "File does not exist in that commit.".to_string()
        }
        Error::AlreadyExists(_) => "A branch with that name already exists.".to_string(),
        Error::InvalidBranchName(name) => format!("'{name}' is not a valid branch name."),
        Error::CannotDeleteCurrentBranch(_) => "Cannot remove the current branch.".to_string(),
        Error::AmbiguousRevision { prefix, candidates } => {
            let mut message = format!("Commit id {prefix} is ambiguous. Candidates:");
            for oid in candidates {
                message.push_str(&format!("\n  {oid}"));
            }
            message
        }
        Error::UntrackedFileConflict(paths) => {
            let mut message =
                "There is an untracked file in the way; delete it or add it first.".to_string();
            for path in paths {
                message.push_str(&format!("\n  {}", path.display()));
            }
            message
        }
        other => other.to_string(),
    }
}
