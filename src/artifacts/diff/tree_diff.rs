use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeChangeType {
    Added(ObjectId),
    Deleted(ObjectId),
    Modified { old: ObjectId, new: ObjectId },
}

impl TreeChangeType {
    pub fn from_entries(old: Option<&ObjectId>, new: Option<&ObjectId>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(TreeChangeType::Added(new.clone())),
            (Some(old), None) => Some(TreeChangeType::Deleted(old.clone())),
            (Some(old), Some(new)) if old != new => Some(TreeChangeType::Modified {
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None,
        }
    }
}

/// Per-path differences between two snapshots, ordered by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDiff {
    changes: BTreeMap<PathBuf, TreeChangeType>,
}

impl TreeDiff {
    pub fn compare(old: &FileMap, new: &FileMap) -> Self {
        let changes = old
            .keys()
            .chain(new.keys())
            .filter_map(|path| {
                TreeChangeType::from_entries(old.get(path), new.get(path))
                    .map(|change| (path.clone(), change))
            })
            .collect();

        TreeDiff { changes }
    }

    pub fn changes(&self) -> &BTreeMap<PathBuf, TreeChangeType> {
        &self.changes
    }
}
