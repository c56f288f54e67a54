use duit_domain::RecordId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Budget not found: {0}")]
    BudgetNotFound(RecordId),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(RecordId),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl CoreError {
    /// Returns `true` for the record-not-found family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::BudgetNotFound(_)
                | CoreError::TransactionNotFound(_)
                | CoreError::CategoryNotFound(_)
        )
    }
}
