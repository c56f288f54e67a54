//! Create, replace and delete budgets in a book.

use tracing::debug;

use duit_domain::{Book, Budget, BudgetDraft, RecordId};

use crate::CoreError;

/// Stateless budget operations over a caller-owned [`Book`].
pub struct BudgetService;

impl BudgetService {
    /// Validates the draft and stores it in insertion order with nothing
    /// spent yet.
    pub fn create(book: &mut Book, draft: BudgetDraft) -> Result<Budget, CoreError> {
        validate(&draft)?;
        let id = book.allocate_id();
        let budget = Budget::from_draft(id, draft);
        book.push_budget(budget.clone());
        debug!(%id, "budget created");
        Ok(budget)
    }

    /// Replaces the category and allocation. The independently tracked
    /// `spent` amount is preserved across updates.
    pub fn update(book: &mut Book, id: RecordId, draft: BudgetDraft) -> Result<Budget, CoreError> {
        validate(&draft)?;
        let slot = book.budget_mut(id).ok_or(CoreError::BudgetNotFound(id))?;
        slot.category = draft.category;
        slot.amount = draft.amount;
        let updated = slot.clone();
        book.touch();
        Ok(updated)
    }

    /// Adds to the consumed amount. Consumption is tracked on the budget
    /// itself rather than derived from transactions.
    pub fn record_spend(book: &mut Book, id: RecordId, amount: f64) -> Result<Budget, CoreError> {
        if amount < 0.0 || !amount.is_finite() {
            return Err(CoreError::Validation(
                "spend amount must be a non-negative number".into(),
            ));
        }
        let slot = book.budget_mut(id).ok_or(CoreError::BudgetNotFound(id))?;
        slot.spent += amount;
        let updated = slot.clone();
        book.touch();
        Ok(updated)
    }

    /// Removes the budget. The book is left untouched when the id is
    /// unknown.
    pub fn delete(book: &mut Book, id: RecordId) -> Result<(), CoreError> {
        let position = book
            .budgets
            .iter()
            .position(|budget| budget.id == id)
            .ok_or(CoreError::BudgetNotFound(id))?;
        book.budgets.remove(position);
        book.touch();
        debug!(%id, "budget deleted");
        Ok(())
    }

    /// Returns the stored sequence in insertion order.
    pub fn list(book: &Book) -> &[Budget] {
        &book.budgets
    }
}

fn validate(draft: &BudgetDraft) -> Result<(), CoreError> {
    if draft.amount < 0.0 || !draft.amount.is_finite() {
        return Err(CoreError::Validation(
            "budget amount must be a non-negative number".into(),
        ));
    }
    if draft.category.trim().is_empty() {
        return Err(CoreError::Validation(
            "budget category must not be empty".into(),
        ));
    }
    Ok(())
}
