//! Transient filter criteria narrowing a transaction list for display.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionKind};

/// A set of optional predicates over transactions. The default criteria
/// admit everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    #[serde(default)]
    pub kind: KindFilter,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = KindFilter::Only(kind);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::Named(category.into());
        self
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn until_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Returns `true` when every present predicate admits the transaction.
    ///
    /// A range whose start lies after its end admits nothing, without being
    /// treated as an error.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !self.kind.admits(transaction.kind) {
            return false;
        }
        if !self.category.admits(&transaction.category) {
            return false;
        }
        if let Some(start) = self.start_date {
            if transaction.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if transaction.date > end {
                return false;
            }
        }
        true
    }

    /// Returns `true` when no predicate is set and the criteria are the
    /// identity filter.
    pub fn is_unbounded(&self) -> bool {
        self.kind == KindFilter::All
            && self.category == CategoryFilter::All
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Restricts matches to one transaction kind, or admits all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl KindFilter {
    pub fn admits(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(wanted) => *wanted == kind,
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindFilter::All => f.write_str("all"),
            KindFilter::Only(kind) => write!(f, "{kind}"),
        }
    }
}

/// Restricts matches to one category name, or admits all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Named(name) => f.write_str(name),
        }
    }
}
