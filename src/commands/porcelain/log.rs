use crate::areas::repository::Repository;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::cmp::Reverse;

impl Repository {
    /// History of the current branch, most recent first
    pub fn log(&self) -> Result<Vec<LogEntry>> {
        self.ensure_initialized()?;

        let head_oid = self.refs().read_head()?;

        self.commit_graph()
            .ancestors(&head_oid)
            .map(|entry| entry.map(LogEntry::from))
            .collect()
    }

    /// Every commit ever made, newest first, whether or not a branch reaches it
    pub fn global_log(&self) -> Result<Vec<LogEntry>> {
        self.ensure_initialized()?;

        let mut entries = self
            .commit_graph()
            .all_commits()?
            .into_iter()
            .map(LogEntry::from)
            .collect::<Vec<_>>();
        entries.sort_by_key(|entry| (Reverse(entry.commit.timestamp()), entry.oid.clone()));

        Ok(entries)
    }

    /// Ids of all commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> Result<Vec<ObjectId>> {
        Ok(self
            .global_log()?
            .into_iter()
            .filter(|entry| entry.commit.message() == message)
            .map(|entry| entry.oid)
            .collect())
    }
}
