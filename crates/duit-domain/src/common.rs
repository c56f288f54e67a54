//! Shared identifier and trait primitives for book records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by a [`crate::Book`] when a record is created.
///
/// Ids are monotonically increasing within a book's lifetime and are never
/// reused, even after deletions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exposes the stable identifier for entities stored in the book.
pub trait Identifiable {
    fn id(&self) -> RecordId;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
