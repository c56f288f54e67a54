//! Budget allocations and usage classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::*;

/// An allocation ceiling for a category, with an independently tracked
/// consumed amount.
///
/// `spent` is maintained by the caller and is deliberately not derived from
/// the book's transactions; see `SummaryService::category_spend` in
/// duit-core for the derived view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: RecordId,
    pub category: String,
    pub amount: f64,
    pub spent: f64,
}

impl Budget {
    /// Materializes a draft into a stored record. New budgets start with
    /// nothing spent.
    pub fn from_draft(id: RecordId, draft: BudgetDraft) -> Self {
        Self {
            id,
            category: draft.category,
            amount: draft.amount,
            spent: 0.0,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.amount - self.spent
    }

    /// Share of the allocation consumed, as a percentage. `None` when the
    /// allocation is zero and the ratio is undefined.
    pub fn percent_spent(&self) -> Option<f64> {
        percent_spent(self.spent, self.amount)
    }

    pub fn usage_level(&self) -> UsageLevel {
        UsageLevel::from_percent(self.percent_spent())
    }
}

impl Identifiable for Budget {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Displayable for Budget {
    fn display_label(&self) -> String {
        format!("{} ({:.0}/{:.0})", self.category, self.spent, self.amount)
    }
}

/// Field set submitted when creating or replacing a budget.
///
/// `spent` is absent on purpose: creation zeroes it and updates preserve the
/// stored value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetDraft {
    pub category: String,
    pub amount: f64,
}

impl BudgetDraft {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// Computes `spent / allocated * 100`, guarding the zero-allocation case
/// with an explicit sentinel instead of a non-finite value.
pub fn percent_spent(spent: f64, allocated: f64) -> Option<f64> {
    if allocated.abs() < f64::EPSILON {
        None
    } else {
        Some(spent / allocated * 100.0)
    }
}

/// Display severity for budget consumption.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Normal,
    Warning,
    Critical,
}

impl UsageLevel {
    /// Classifies a percentage: above 90 is critical, above 70 is warning,
    /// anything else (including an undefined percentage) is normal.
    pub fn from_percent(percent: Option<f64>) -> Self {
        match percent {
            Some(value) if value > 90.0 => UsageLevel::Critical,
            Some(value) if value > 70.0 => UsageLevel::Warning,
            _ => UsageLevel::Normal,
        }
    }

    pub fn is_elevated(self) -> bool {
        !matches!(self, UsageLevel::Normal)
    }
}

impl fmt::Display for UsageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UsageLevel::Normal => "normal",
            UsageLevel::Warning => "warning",
            UsageLevel::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Aggregated allocation totals across a set of budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetTotals {
    pub allocated: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl BudgetTotals {
    /// Sums allocations and consumption. `remaining` may be negative, which
    /// is a meaningful over-budget state rather than an error.
    pub fn from_budgets(budgets: &[Budget]) -> Self {
        let allocated: f64 = budgets.iter().map(|budget| budget.amount).sum();
        let spent: f64 = budgets.iter().map(|budget| budget.spent).sum();
        Self {
            allocated,
            spent,
            remaining: allocated - spent,
        }
    }

    pub fn percent_spent(&self) -> Option<f64> {
        percent_spent(self.spent, self.allocated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_spent_is_plain_ratio() {
        assert_eq!(percent_spent(50.0, 100.0), Some(50.0));
        assert_eq!(percent_spent(0.0, 100.0), Some(0.0));
    }

    #[test]
    fn percent_spent_guards_zero_allocation() {
        assert_eq!(percent_spent(25.0, 0.0), None);
        assert_eq!(percent_spent(0.0, 0.0), None);
    }

    #[test]
    fn usage_level_thresholds() {
        assert_eq!(UsageLevel::from_percent(Some(95.0)), UsageLevel::Critical);
        assert_eq!(UsageLevel::from_percent(Some(90.0)), UsageLevel::Warning);
        assert_eq!(UsageLevel::from_percent(Some(80.0)), UsageLevel::Warning);
        assert_eq!(UsageLevel::from_percent(Some(70.0)), UsageLevel::Normal);
        assert_eq!(UsageLevel::from_percent(Some(0.0)), UsageLevel::Normal);
        assert_eq!(UsageLevel::from_percent(None), UsageLevel::Normal);
    }

    #[test]
    fn warning_scenario_from_rupiah_amounts() {
        let budget = Budget {
            id: RecordId(1),
            category: "Food".into(),
            amount: 1_500_000.0,
            spent: 1_200_000.0,
        };
        let percent = budget.percent_spent().unwrap();
        assert!((percent - 80.0).abs() < 1e-9);
        assert_eq!(budget.usage_level(), UsageLevel::Warning);
    }

    #[test]
    fn totals_allow_negative_remaining() {
        let budgets = vec![
            Budget {
                id: RecordId(1),
                category: "Food".into(),
                amount: 100.0,
                spent: 150.0,
            },
            Budget {
                id: RecordId(2),
                category: "Transport".into(),
                amount: 50.0,
                spent: 25.0,
            },
        ];
        let totals = BudgetTotals::from_budgets(&budgets);
        assert_eq!(totals.allocated, 150.0);
        assert_eq!(totals.spent, 175.0);
        assert_eq!(totals.remaining, -25.0);
    }
}
