use chrono::NaiveDate;
use duit_core::{
    BudgetService, CategoryService, CoreError, TransactionService,
};
use duit_domain::{
    Book, BudgetDraft, CategoryDraft, CategoryKind, RecordId, TransactionDraft, TransactionKind,
};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(category: &str, amount: f64, day: u32) -> TransactionDraft {
    TransactionDraft::new(
        TransactionKind::Expense,
        amount,
        category,
        sample_date(2023, 4, day),
        "",
    )
}

#[test]
fn created_records_get_increasing_ids() {
    let mut book = Book::new("Household");
    let first = BudgetService::create(&mut book, BudgetDraft::new("Food", 100.0)).unwrap();
    let second =
        TransactionService::create(&mut book, expense("Food", 10.0, 1)).unwrap();
    let third = CategoryService::create(
        &mut book,
        CategoryDraft::new("Food", CategoryKind::Expense),
    )
    .unwrap();

    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

#[test]
fn transactions_list_newest_first() {
    let mut book = Book::new("Household");
    TransactionService::create(&mut book, expense("Food", 10.0, 1)).unwrap();
    TransactionService::create(&mut book, expense("Transport", 20.0, 2)).unwrap();
    TransactionService::create(&mut book, expense("Food", 30.0, 3)).unwrap();

    let listed = TransactionService::list(&book);
    assert_eq!(listed[0].amount, 30.0);
    assert_eq!(listed[2].amount, 10.0);
}

#[test]
fn update_is_a_full_record_replacement() {
    let mut book = Book::new("Household");
    let created = TransactionService::create(&mut book, expense("Food", 10.0, 1)).unwrap();

    let replacement = TransactionDraft::new(
        TransactionKind::Income,
        99.0,
        "Salary",
        sample_date(2023, 4, 5),
        "corrected",
    );
    let updated = TransactionService::update(&mut book, created.id, replacement).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.kind, TransactionKind::Income);
    assert_eq!(updated.category, "Salary");
    assert_eq!(updated.description, "corrected");
    assert_eq!(book.transaction_count(), 1);
}

#[test]
fn budget_update_preserves_tracked_spend() {
    let mut book = Book::new("Household");
    let created = BudgetService::create(&mut book, BudgetDraft::new("Food", 100.0)).unwrap();
    assert_eq!(created.spent, 0.0);

    BudgetService::record_spend(&mut book, created.id, 40.0).unwrap();
    let updated =
        BudgetService::update(&mut book, created.id, BudgetDraft::new("Groceries", 150.0))
            .unwrap();

    assert_eq!(updated.category, "Groceries");
    assert_eq!(updated.amount, 150.0);
    assert_eq!(updated.spent, 40.0);
}

#[test]
fn delete_unknown_id_reports_not_found_and_changes_nothing() {
    let mut book = Book::new("Household");
    TransactionService::create(&mut book, expense("Food", 10.0, 1)).unwrap();
    BudgetService::create(&mut book, BudgetDraft::new("Food", 100.0)).unwrap();
    let missing = RecordId(9_999);

    let err = TransactionService::delete(&mut book, missing).unwrap_err();
    assert!(matches!(err, CoreError::TransactionNotFound(id) if id == missing));
    assert!(err.is_not_found());
    assert_eq!(book.transaction_count(), 1);

    let err = BudgetService::delete(&mut book, missing).unwrap_err();
    assert!(matches!(err, CoreError::BudgetNotFound(id) if id == missing));
    assert_eq!(book.budgets.len(), 1);
}

#[test]
fn update_unknown_id_reports_not_found() {
    let mut book = Book::new("Household");
    let err = BudgetService::update(&mut book, RecordId(7), BudgetDraft::new("Food", 1.0))
        .unwrap_err();
    assert!(matches!(err, CoreError::BudgetNotFound(_)));
}

#[test]
fn drafts_are_validated() {
    let mut book = Book::new("Household");

    let err = BudgetService::create(&mut book, BudgetDraft::new("Food", -5.0)).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let err = TransactionService::create(&mut book, expense("  ", 10.0, 1)).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    assert!(book.budgets.is_empty());
    assert_eq!(book.transaction_count(), 0);
}

#[test]
fn duplicate_category_names_are_rejected() {
    let mut book = Book::new("Household");
    CategoryService::create(&mut book, CategoryDraft::new("Food", CategoryKind::Expense))
        .unwrap();
    let err =
        CategoryService::create(&mut book, CategoryDraft::new("Food", CategoryKind::Both))
            .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(book.categories.len(), 1);
}

#[test]
fn category_find_reports_not_found() {
    let book = Book::new("Household");
    let err = CategoryService::find(&book, "Ghost").unwrap_err();
    assert!(matches!(err, CoreError::CategoryNotFound(name) if name == "Ghost"));
}
