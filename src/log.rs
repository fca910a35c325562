use serde::{Deserialize, Serialize};

use crate::{ErrorFields, ErrorKind};

/// One dispatched error as recorded by a collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Kind the error was dispatched as.
    pub kind: ErrorKind,
    /// Fields exactly as passed to dispatch, before defaults.
    pub fields: ErrorFields,
}

/// Ordered, append-only record of dispatched errors.
///
/// Owned by the connection or cursor it is attached to; dispatch only ever
/// appends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLog {
    entries: Vec<LogEntry>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ErrorKind, fields: ErrorFields) {
        self.entries.push(LogEntry { kind, fields });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    /// Removes every entry. Meant for the owning collaborator.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
