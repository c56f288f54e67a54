//! Aggregation over budgets and transactions for the overview views.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use duit_domain::{Book, Budget, BudgetTotals, RecordId, Transaction, UsageLevel};

/// Stateless aggregation helpers that operate over [`Book`] snapshots.
pub struct SummaryService;

impl SummaryService {
    /// Sums allocations and consumption across every budget in the book.
    pub fn budget_totals(book: &Book) -> BudgetTotals {
        BudgetTotals::from_budgets(&book.budgets)
    }

    /// Builds the dashboard view: income/expense totals over all
    /// transactions, budget totals, the most recent entries and every budget
    /// whose usage level is elevated.
    pub fn dashboard(book: &Book, recent_limit: usize) -> DashboardSummary {
        let total_income: f64 = book
            .transactions
            .iter()
            .filter(|txn| txn.is_income())
            .map(|txn| txn.amount)
            .sum();
        let total_expense: f64 = book
            .transactions
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| txn.amount)
            .sum();

        let recent_transactions = book
            .transactions
            .iter()
            .take(recent_limit)
            .cloned()
            .collect();

        let warnings = book
            .budgets
            .iter()
            .filter(|budget| budget.usage_level().is_elevated())
            .map(BudgetAlert::for_budget)
            .collect();

        DashboardSummary {
            totals: Self::budget_totals(book),
            total_income,
            total_expense,
            net: total_income - total_expense,
            recent_transactions,
            warnings,
        }
    }

    /// Derives per-category expense sums from the transactions and pairs
    /// them with the budgets' independently tracked `spent`, so the two
    /// figures can be compared. Never mutates the budgets.
    pub fn category_spend(book: &Book) -> Vec<CategorySpend> {
        let mut transaction_sums: HashMap<&str, f64> = HashMap::new();
        for txn in book.transactions.iter().filter(|txn| txn.is_expense()) {
            *transaction_sums.entry(txn.category.as_str()).or_default() += txn.amount;
        }

        let mut rows: Vec<CategorySpend> = book
            .budgets
            .iter()
            .map(|budget| CategorySpend {
                category: budget.category.clone(),
                tracked_spent: Some(budget.spent),
                transaction_spent: transaction_sums
                    .remove(budget.category.as_str())
                    .unwrap_or(0.0),
            })
            .collect();

        // Expense categories without a budget still show up.
        for (category, spent) in transaction_sums {
            rows.push(CategorySpend {
                category: category.to_string(),
                tracked_spent: None,
                transaction_spent: spent,
            });
        }

        rows.sort_by(|a, b| a.category.cmp(&b.category));
        rows
    }
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub totals: BudgetTotals,
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    pub recent_transactions: Vec<Transaction>,
    pub warnings: Vec<BudgetAlert>,
}

/// A budget whose consumption crossed the warning or critical threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub budget_id: RecordId,
    pub category: String,
    pub allocated: f64,
    pub spent: f64,
    pub percent_spent: Option<f64>,
    pub level: UsageLevel,
}

impl BudgetAlert {
    pub fn for_budget(budget: &Budget) -> Self {
        Self {
            budget_id: budget.id,
            category: budget.category.clone(),
            allocated: budget.amount,
            spent: budget.spent,
            percent_spent: budget.percent_spent(),
            level: budget.usage_level(),
        }
    }
}

/// One category's consumption, both as tracked on its budget and as derived
/// from the expense transactions. The two can legitimately diverge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub tracked_spent: Option<f64>,
    pub transaction_spent: f64,
}
