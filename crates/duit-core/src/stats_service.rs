//! Monthly and per-category statistics over a book's transactions.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use duit_domain::{Book, FilterCriteria};

use crate::TransactionService;

/// Stateless statistics over [`Book`] snapshots.
pub struct StatsService;

impl StatsService {
    /// Income and expense totals for every calendar month of `year`, in
    /// month order. Months without activity report zero totals.
    pub fn monthly(book: &Book, year: i32) -> Vec<MonthlyStat> {
        let mut stats: Vec<MonthlyStat> = (1..=12)
            .map(|month| MonthlyStat {
                year,
                month,
                income: 0.0,
                expense: 0.0,
            })
            .collect();

        for txn in &book.transactions {
            if txn.date.year() != year {
                continue;
            }
            let slot = &mut stats[txn.date.month() as usize - 1];
            if txn.is_income() {
                slot.income += txn.amount;
            } else {
                slot.expense += txn.amount;
            }
        }

        stats
    }

    /// Expense totals grouped by category over the transactions admitted by
    /// the criteria, sorted by descending total with name as tie-breaker.
    pub fn by_category(book: &Book, criteria: &FilterCriteria) -> Vec<CategoryStat> {
        let matched = TransactionService::filter(&book.transactions, criteria);

        let mut sums: HashMap<String, f64> = HashMap::new();
        for txn in matched.iter().filter(|txn| txn.is_expense()) {
            *sums.entry(txn.category.clone()).or_default() += txn.amount;
        }

        let mut stats: Vec<CategoryStat> = sums
            .into_iter()
            .map(|(category, total)| CategoryStat { category, total })
            .collect();
        stats.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        stats
    }
}

/// Income vs expense for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStat {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyStat {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Total expenses attributed to one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryStat {
    pub category: String,
    pub total: f64,
}
