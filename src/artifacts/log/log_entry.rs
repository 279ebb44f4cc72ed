use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// A commit together with its id
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub commit: Commit,
}

impl From<(ObjectId, Commit)> for LogEntry {
    fn from((oid, commit): (ObjectId, Commit)) -> Self {
        LogEntry { oid, commit }
    }
}
