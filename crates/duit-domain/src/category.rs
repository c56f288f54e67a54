//! Domain types representing transaction categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{common::*, TransactionKind};

/// Reference data labelling transactions and budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub kind: CategoryKind,
}

impl Category {
    pub fn from_draft(id: RecordId, draft: CategoryDraft) -> Self {
        Self {
            id,
            name: draft.name,
            kind: draft.kind,
        }
    }

    /// Returns `true` when the category may label transactions of `kind`.
    pub fn admits(&self, kind: TransactionKind) -> bool {
        match self.kind {
            CategoryKind::Both => true,
            CategoryKind::Income => kind == TransactionKind::Income,
            CategoryKind::Expense => kind == TransactionKind::Expense,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Field set submitted when creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub kind: CategoryKind,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Which side of the book a category applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
            CategoryKind::Both => "both",
        };
        f.write_str(label)
    }
}
