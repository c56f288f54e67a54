//! Persistence seam for books.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use duit_domain::Book;

use crate::CoreError;

/// Describes one backup file produced for a book. Backends fill in the
/// creation time and note once at listing time; callers never re-derive
/// them from the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookBackupInfo {
    pub book: String,
    pub file_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing books and their
/// backups. The in-memory [`Book`] stays the single mutation surface; a
/// backend only snapshots and restores it.
pub trait BookStorage: Send + Sync {
    fn save_book(&self, name: &str, book: &Book) -> Result<(), CoreError>;
    fn load_book(&self, name: &str) -> Result<Book, CoreError>;
    fn list_books(&self) -> Result<Vec<String>, CoreError>;
    fn delete_book(&self, name: &str) -> Result<(), CoreError>;
    fn backup_book(
        &self,
        name: &str,
        book: &Book,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError>;
    fn list_backups(&self, name: &str) -> Result<Vec<BookBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<Book, CoreError>;
}
