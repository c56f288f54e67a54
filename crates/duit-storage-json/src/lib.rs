//! Filesystem-backed JSON persistence for books and their backups.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use duit_core::{
    storage::{BookBackupInfo, BookStorage},
    CoreError, SummaryService,
};
use duit_domain::Book;

const FILE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const DEFAULT_RETENTION: usize = 5;

/// Stores each book as one JSON file, keeping a bounded set of timestamped
/// backups beside it.
#[derive(Clone)]
pub struct JsonBookStorage {
    books_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonBookStorage {
    pub fn new(books_dir: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(books_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        books_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&books_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            books_dir,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", canonical_name(name), FILE_EXTENSION))
    }

    /// Loads every stored book and summarizes it for listings.
    pub fn list_book_metadata(&self) -> Result<Vec<BookMetadata>, CoreError> {
        let mut entries = Vec::new();
        for slug in self.list_books()? {
            let book = self.load_book(&slug)?;
            let totals = SummaryService::budget_totals(&book);
            entries.push(BookMetadata {
                slug: slug.clone(),
                name: book.name.clone(),
                path: self.book_path(&slug),
                created_at: book.created_at,
                updated_at: book.updated_at,
                budget_count: book.budgets.len(),
                transaction_count: book.transactions.len(),
                category_count: book.categories.len(),
                total_allocated: totals.allocated,
                total_remaining: totals.remaining,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn write_backup_file(
        &self,
        book: &Book,
        name: &str,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        let slug = canonical_name(name);
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let note = note.and_then(note_slug);
        let file_name = backup_file_name(&slug, &stamp, note.as_deref());
        let path = self.backup_dir(name).join(&file_name);
        persist_atomically(&path, &serialize_book(book)?)?;
        self.prune_backups(name)?;
        Ok(parse_backup_name(&slug, &file_name, path))
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<(), CoreError> {
        let slug = canonical_name(name);
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        fs::copy(path, dir.join(backup_file_name(&slug, &stamp, None)))?;
        self.prune_backups(name)
    }

    /// Drops the oldest backups beyond the retention limit. Relies on
    /// [`BookStorage::list_backups`] returning newest first.
    fn prune_backups(&self, name: &str) -> Result<(), CoreError> {
        for stale in self.list_backups(name)?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(stale.path);
        }
        Ok(())
    }
}

impl BookStorage for JsonBookStorage {
    fn save_book(&self, name: &str, book: &Book) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        persist_atomically(&path, &serialize_book(book)?)
    }

    fn load_book(&self, name: &str) -> Result<Book, CoreError> {
        load_book_from_path(&self.book_path(name))
    }

    fn list_books(&self) -> Result<Vec<String>, CoreError> {
        if !self.books_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.books_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_book(&self, name: &str) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn backup_book(
        &self,
        name: &str,
        book: &Book,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        self.write_backup_file(book, name, note)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<BookBackupInfo>, CoreError> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let slug = canonical_name(name);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(parse_backup_name(&slug, file_name, path.clone()));
            }
        }
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });
        Ok(entries)
    }

    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<Book, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.file_name
            )));
        }
        let target = self.book_path(&backup.book);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&backup.path, &target)?;
        load_book_from_path(&target)
    }
}

/// Loads a book from an arbitrary filesystem path.
pub fn load_book_from_path(path: &Path) -> Result<Book, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Summary row describing one stored book.
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub slug: String,
    pub name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub budget_count: usize,
    pub transaction_count: usize,
    pub category_count: usize,
    pub total_allocated: f64,
    pub total_remaining: f64,
}

/// Reduces a book name to the slug used for its file names.
fn canonical_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else {
            slug.push('_');
        }
    }
    if slug.bytes().all(|b| b == b'_') {
        "book".into()
    } else {
        slug
    }
}

/// Collapses a free-form note into a lowercase dashed slug, or `None` when
/// nothing survives.
fn note_slug(raw: &str) -> Option<String> {
    let slug = raw
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    (!slug.is_empty()).then_some(slug)
}

fn backup_file_name(slug: &str, stamp: &str, note: Option<&str>) -> String {
    match note {
        Some(label) => format!("{slug}_{stamp}_{label}.{FILE_EXTENSION}"),
        None => format!("{slug}_{stamp}.{FILE_EXTENSION}"),
    }
}

/// Recovers the timestamp and note from a backup file name. The slug may
/// itself contain underscores, so the stamp is located by shape rather than
/// by position.
fn parse_backup_name(slug: &str, file_name: &str, path: PathBuf) -> BookBackupInfo {
    let mut created_at = None;
    let mut note = None;
    if let Some(stem) = file_name.strip_suffix(&format!(".{FILE_EXTENSION}")) {
        let segments: Vec<&str> = stem.split('_').collect();
        for (index, pair) in segments.windows(2).enumerate() {
            if !is_digits(pair[0], 8) || !is_digits(pair[1], 4) {
                continue;
            }
            let raw = format!("{}{}", pair[0], pair[1]);
            if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M") {
                created_at = Some(DateTime::from_naive_utc_and_offset(naive, Utc));
                note = segments.get(index + 2).map(|s| s.to_string());
                break;
            }
        }
    }
    BookBackupInfo {
        book: slug.to_string(),
        file_name: file_name.to_string(),
        created_at,
        note,
        path,
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn persist_atomically(path: &Path, json: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = path.with_extension(format!("{FILE_EXTENSION}.staging"));
    fs::write(&staging, json)?;
    fs::rename(&staging, path)?;
    Ok(())
}

fn serialize_book(book: &Book) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}
