//! Bundled sample data for demos and tests.

use chrono::NaiveDate;

use crate::{
    Book, Budget, BudgetDraft, Category, CategoryDraft, CategoryKind, Transaction,
    TransactionDraft, TransactionKind,
};

/// Builds a book pre-filled with a month of plausible activity: seven
/// categories, five budgets (partly consumed) and six transactions.
pub fn sample_book() -> Book {
    let mut book = Book::new("Sample");

    let categories = [
        ("Food", CategoryKind::Expense),
        ("Transport", CategoryKind::Expense),
        ("Entertainment", CategoryKind::Expense),
        ("Shopping", CategoryKind::Expense),
        ("Salary", CategoryKind::Income),
        ("Freelance", CategoryKind::Income),
        ("Other", CategoryKind::Both),
    ];
    for (name, kind) in categories {
        let id = book.allocate_id();
        book.push_category(Category::from_draft(id, CategoryDraft::new(name, kind)));
    }

    let budgets = [
        ("Food", 1_500_000.0, 1_200_000.0),
        ("Transport", 800_000.0, 600_000.0),
        ("Entertainment", 1_000_000.0, 950_000.0),
        ("Shopping", 1_200_000.0, 800_000.0),
        ("Other", 500_000.0, 250_000.0),
    ];
    for (category, amount, spent) in budgets {
        let id = book.allocate_id();
        let mut budget = Budget::from_draft(id, BudgetDraft::new(category, amount));
        budget.spent = spent;
        book.push_budget(budget);
    }

    // Oldest first so the newest-first store ends up in display order.
    let transactions = [
        (
            TransactionKind::Income,
            1_000_000.0,
            "Freelance",
            date(2023, 3, 27),
            "Design project",
        ),
        (
            TransactionKind::Expense,
            350_000.0,
            "Shopping",
            date(2023, 3, 28),
            "Monthly groceries",
        ),
        (
            TransactionKind::Expense,
            1_000_000.0,
            "Entertainment",
            date(2023, 3, 29),
            "Concert tickets",
        ),
        (
            TransactionKind::Expense,
            500_000.0,
            "Transport",
            date(2023, 3, 30),
            "Fuel",
        ),
        (
            TransactionKind::Income,
            5_000_000.0,
            "Salary",
            date(2023, 4, 1),
            "Monthly salary",
        ),
        (
            TransactionKind::Expense,
            150_000.0,
            "Food",
            date(2023, 4, 1),
            "Lunch",
        ),
    ];
    for (kind, amount, category, when, description) in transactions {
        let id = book.allocate_id();
        book.push_transaction(Transaction::from_draft(
            id,
            TransactionDraft::new(kind, amount, category, when, description),
        ));
    }

    book
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
