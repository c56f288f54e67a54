use chrono::NaiveDate;
use duit_core::{StatsService, SummaryService, TransactionService};
use duit_domain::{
    sample::sample_book, Book, Budget, FilterCriteria, RecordId, TransactionDraft,
    TransactionKind, UsageLevel,
};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn budget_totals_sum_all_allocations() {
    let book = sample_book();
    let totals = SummaryService::budget_totals(&book);
    assert_eq!(totals.allocated, 5_000_000.0);
    assert_eq!(totals.spent, 3_800_000.0);
    assert_eq!(totals.remaining, 1_200_000.0);
}

#[test]
fn dashboard_reports_income_expense_and_warnings() {
    let book = sample_book();
    let dashboard = SummaryService::dashboard(&book, 4);

    assert_eq!(dashboard.total_income, 6_000_000.0);
    assert_eq!(dashboard.total_expense, 2_000_000.0);
    assert_eq!(dashboard.net, 4_000_000.0);
    assert_eq!(dashboard.recent_transactions.len(), 4);
    assert_eq!(dashboard.recent_transactions[0].description, "Lunch");

    // Food 80% and Transport 75% are warnings, Entertainment 95% is critical.
    let mut flagged: Vec<&str> = dashboard
        .warnings
        .iter()
        .map(|alert| alert.category.as_str())
        .collect();
    flagged.sort_unstable();
    assert_eq!(flagged, vec!["Entertainment", "Food", "Transport"]);

    let entertainment = dashboard
        .warnings
        .iter()
        .find(|alert| alert.category == "Entertainment")
        .unwrap();
    assert_eq!(entertainment.level, UsageLevel::Critical);
}

#[test]
fn zero_allocation_budget_never_produces_a_non_finite_percent() {
    let mut book = Book::new("Edge");
    let id = book.allocate_id();
    book.push_budget(Budget {
        id,
        category: "Misc".into(),
        amount: 0.0,
        spent: 50.0,
    });

    let budget = book.budget(id).unwrap();
    assert_eq!(budget.percent_spent(), None);
    assert_eq!(budget.usage_level(), UsageLevel::Normal);

    let dashboard = SummaryService::dashboard(&book, 5);
    assert!(dashboard.warnings.is_empty());
}

#[test]
fn category_spend_pairs_tracked_and_derived_figures() {
    let book = sample_book();
    let rows = SummaryService::category_spend(&book);

    let food = rows.iter().find(|row| row.category == "Food").unwrap();
    assert_eq!(food.tracked_spent, Some(1_200_000.0));
    assert_eq!(food.transaction_spent, 150_000.0);

    // Sorted by category name, budget-less categories included.
    let names: Vec<&str> = rows.iter().map(|row| row.category.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn monthly_stats_bucket_by_month_within_the_year() {
    let book = sample_book();
    let stats = StatsService::monthly(&book, 2023);
    assert_eq!(stats.len(), 12);

    let march = &stats[2];
    assert_eq!(march.month, 3);
    assert_eq!(march.income, 1_000_000.0);
    assert_eq!(march.expense, 1_850_000.0);
    assert_eq!(march.net(), -850_000.0);

    let april = &stats[3];
    assert_eq!(april.income, 5_000_000.0);
    assert_eq!(april.expense, 150_000.0);

    let stats_other_year = StatsService::monthly(&book, 2024);
    assert!(stats_other_year
        .iter()
        .all(|stat| stat.income == 0.0 && stat.expense == 0.0));
}

#[test]
fn by_category_counts_expenses_only_and_sorts_descending() {
    let mut book = sample_book();
    // An income entry in an expense category must not leak into the stats.
    TransactionService::create(
        &mut book,
        TransactionDraft::new(
            TransactionKind::Income,
            400_000.0,
            "Food",
            sample_date(2023, 4, 2),
            "refund",
        ),
    )
    .unwrap();

    let stats = StatsService::by_category(&book, &FilterCriteria::default());
    assert_eq!(stats[0].category, "Entertainment");
    assert_eq!(stats[0].total, 1_000_000.0);

    let food = stats.iter().find(|stat| stat.category == "Food").unwrap();
    assert_eq!(food.total, 150_000.0);
    assert!(stats.iter().all(|stat| stat.category != "Salary"));
}

#[test]
fn by_category_honors_filter_criteria() {
    let book = sample_book();
    let criteria = FilterCriteria::default().from_date(sample_date(2023, 4, 1));
    let stats = StatsService::by_category(&book, &criteria);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].category, "Food");
}
