use std::fmt;

use serde::{Deserialize, Serialize};

/// Controls guarded by a busy flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Save,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Save => write!(f, "save"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// One busy flag per operation; a set flag disables only its own control.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusyFlags {
    pub add: bool,
    pub save: bool,
    pub delete: bool,
}

impl BusyFlags {
    pub fn is_set(&self, op: Operation) -> bool {
        match op {
            Operation::Add => self.add,
            Operation::Save => self.save,
            Operation::Delete => self.delete,
        }
    }

    pub fn set(&mut self, op: Operation, value: bool) {
        match op {
            Operation::Add => self.add = value,
            Operation::Save => self.save = value,
            Operation::Delete => self.delete = value,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Bookmark,
    Folder,
}

/// Delete confirmation state machine, one per entity kind.
///
/// `Idle -> PendingConfirmation -> Deleting -> Idle`, or
/// `PendingConfirmation -> Idle` on cancel.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum DeleteState {
    #[default]
    Idle,
    PendingConfirmation(i64),
    Deleting(i64),
}

impl DeleteState {
    pub fn target(&self) -> Option<i64> {
        match self {
            DeleteState::Idle => None,
            DeleteState::PendingConfirmation(id) | DeleteState::Deleting(id) => Some(*id),
        }
    }
}
