use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusReport;
use crate::errors::Result;

impl Repository {
    pub fn status(&self) -> Result<StatusReport> {
        let index = self.load_index()?;

        let report = StatusReport {
            branches: self.branches()?,
            staged: index.additions().keys().cloned().collect(),
            removed: index.removals().iter().cloned().collect(),
        };
        tracing::debug!(
            branch = ?report.current_branch(),
            clean = report.is_clean(),
            "status"
        );

        Ok(report)
    }
}
