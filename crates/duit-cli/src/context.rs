//! Shared runtime state for command dispatch.

use std::io::ErrorKind;
use std::path::PathBuf;

use duit_config::{Config, ConfigManager};
use duit_core::CoreError;
use duit_domain::Book;
use duit_storage_json::JsonBookStorage;

use crate::error::CliResult;

const DEFAULT_BOOK_NAME: &str = "household";

/// Everything a command needs: configuration, storage and the active book
/// name. The book itself is loaded lazily so read-only commands like
/// `book list` never create files.
pub struct AppContext {
    pub config_manager: ConfigManager,
    pub config: Config,
    pub storage: JsonBookStorage,
    pub book_name: String,
}

impl AppContext {
    pub fn bootstrap(data_dir: Option<PathBuf>, book_flag: Option<String>) -> CliResult<Self> {
        let root = match data_dir {
            Some(dir) => dir,
            None => {
                // Read the config twice when no explicit root was given: once
                // from the default location to learn a custom data root, then
                // again from that root.
                let probe = ConfigManager::with_base_dir(Config::default().resolve_data_root())?;
                probe.load()?.resolve_data_root()
            }
        };

        let config_manager = ConfigManager::with_base_dir(root.clone())?;
        let config = config_manager.load()?;
        let storage = JsonBookStorage::new(root.join("books"), root.join("backups"))?;

        let book_name = book_flag
            .or_else(|| config.last_opened_book.clone())
            .unwrap_or_else(|| DEFAULT_BOOK_NAME.to_string());

        Ok(Self {
            config_manager,
            config,
            storage,
            book_name,
        })
    }

    /// Loads the active book, starting an empty one when none is stored yet.
    pub fn load_or_new(&self) -> CliResult<Book> {
        use duit_core::storage::BookStorage;
        match self.storage.load_book(&self.book_name) {
            Ok(book) => Ok(book),
            Err(CoreError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(book = %self.book_name, "starting a new book");
                Ok(Book::new(&self.book_name))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Persists the book and remembers it as the last opened one.
    pub fn save(&mut self, book: &Book) -> CliResult<()> {
        use duit_core::storage::BookStorage;
        self.storage.save_book(&self.book_name, book)?;
        if self.config.last_opened_book.as_deref() != Some(self.book_name.as_str()) {
            self.config.last_opened_book = Some(self.book_name.clone());
            self.config_manager.save(&self.config)?;
        }
        Ok(())
    }

    /// Records a book as the default without loading it.
    pub fn set_default_book(&mut self, name: &str) -> CliResult<()> {
        self.config.last_opened_book = Some(name.to_string());
        self.config_manager.save(&self.config)?;
        Ok(())
    }
}
