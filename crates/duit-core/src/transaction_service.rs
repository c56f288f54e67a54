//! Create, replace, delete and filter transactions in a book.

use tracing::debug;

use duit_domain::{Book, FilterCriteria, RecordId, Transaction, TransactionDraft};

use crate::CoreError;

/// Stateless transaction operations over a caller-owned [`Book`].
pub struct TransactionService;

impl TransactionService {
    /// Validates the draft and stores it newest-first under a fresh id.
    pub fn create(book: &mut Book, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        validate(&draft)?;
        let id = book.allocate_id();
        let transaction = Transaction::from_draft(id, draft);
        book.push_transaction(transaction.clone());
        debug!(%id, "transaction created");
        Ok(transaction)
    }

    /// Replaces every mutable field of the transaction with the draft,
    /// keeping the id and list position.
    pub fn update(
        book: &mut Book,
        id: RecordId,
        draft: TransactionDraft,
    ) -> Result<Transaction, CoreError> {
        validate(&draft)?;
        let slot = book
            .transaction_mut(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        *slot = Transaction::from_draft(id, draft);
        let updated = slot.clone();
        book.touch();
        Ok(updated)
    }

    /// Removes the transaction. The book is left untouched when the id is
    /// unknown.
    pub fn delete(book: &mut Book, id: RecordId) -> Result<(), CoreError> {
        let position = book
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        book.transactions.remove(position);
        book.touch();
        debug!(%id, "transaction deleted");
        Ok(())
    }

    /// Returns the stored sequence, newest first.
    pub fn list(book: &Book) -> &[Transaction] {
        &book.transactions
    }

    /// Retains exactly the transactions admitted by the criteria, preserving
    /// input order. Pure and deterministic.
    pub fn filter(transactions: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| criteria.matches(txn))
            .cloned()
            .collect()
    }
}

fn validate(draft: &TransactionDraft) -> Result<(), CoreError> {
    if draft.amount < 0.0 || !draft.amount.is_finite() {
        return Err(CoreError::Validation(
            "transaction amount must be a non-negative number".into(),
        ));
    }
    if draft.category.trim().is_empty() {
        return Err(CoreError::Validation(
            "transaction category must not be empty".into(),
        ));
    }
    Ok(())
}
