//! The book: an in-memory, ordered collection of finance records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Budget, Category, RecordId, Transaction};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Holds every record collection for one set of books, standing in for a
/// persisted backend. Owned by a single caller; all mutation is synchronous
/// through `&mut` access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default = "Book::first_record_id")]
    next_record_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            budgets: Vec::new(),
            transactions: Vec::new(),
            categories: Vec::new(),
            next_record_id: Self::first_record_id(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Hands out the next record id. Ids are never reused within a book.
    pub fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_record_id);
        self.next_record_id += 1;
        id
    }

    /// Stores a budget in insertion order.
    pub fn push_budget(&mut self, budget: Budget) -> RecordId {
        let id = budget.id;
        self.budgets.push(budget);
        self.touch();
        id
    }

    /// Stores a transaction newest-first, matching how the record list is
    /// displayed.
    pub fn push_transaction(&mut self, transaction: Transaction) -> RecordId {
        let id = transaction.id;
        self.transactions.insert(0, transaction);
        self.touch();
        id
    }

    /// Stores a category in insertion order.
    pub fn push_category(&mut self, category: Category) -> RecordId {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn budget(&self, id: RecordId) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budget_mut(&mut self, id: RecordId) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }

    pub fn transaction(&self, id: RecordId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: RecordId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn first_record_id() -> u64 {
        1
    }

    fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BudgetDraft, CategoryDraft, CategoryKind};

    #[test]
    fn allocated_ids_are_strictly_increasing() {
        let mut book = Book::new("Household");
        let first = book.allocate_id();
        let second = book.allocate_id();
        let third = book.allocate_id();
        assert!(first < second && second < third);
    }

    #[test]
    fn budgets_keep_insertion_order() {
        let mut book = Book::new("Household");
        for name in ["Food", "Transport", "Fun"] {
            let id = book.allocate_id();
            book.push_budget(Budget::from_draft(id, BudgetDraft::new(name, 100.0)));
        }
        let order: Vec<&str> = book
            .budgets
            .iter()
            .map(|budget| budget.category.as_str())
            .collect();
        assert_eq!(order, vec!["Food", "Transport", "Fun"]);
    }

    #[test]
    fn deserializing_a_legacy_book_defaults_the_counter() {
        let json = r#"{
            "name": "Old",
            "created_at": "2023-04-01T00:00:00Z",
            "updated_at": "2023-04-01T00:00:00Z"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.schema_version, 1);
        assert!(book.budgets.is_empty());

        let mut book = book;
        assert_eq!(book.allocate_id(), RecordId(1));
    }

    #[test]
    fn category_lookup_is_by_exact_name() {
        let mut book = Book::new("Household");
        let id = book.allocate_id();
        book.push_category(Category::from_draft(
            id,
            CategoryDraft::new("Food", CategoryKind::Expense),
        ));
        assert!(book.category_named("Food").is_some());
        assert!(book.category_named("food").is_none());
    }
}
