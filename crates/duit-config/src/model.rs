use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable CLI preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_book: Option<String>,
    #[serde(default = "Config::default_recent_transaction_limit")]
    pub recent_transaction_limit: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for book data. Defaults to the
    /// platform data directory under `duit`.
    pub default_data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "id-ID".into(),
            currency: "IDR".into(),
            last_opened_book: None,
            recent_transaction_limit: Self::default_recent_transaction_limit(),
            default_data_root: None,
        }
    }
}

impl Config {
    pub fn default_recent_transaction_limit() -> usize {
        5
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.default_data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("duit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_rupiah_locale() {
        let config = Config::default();
        assert_eq!(config.locale, "id-ID");
        assert_eq!(config.currency, "IDR");
        assert_eq!(config.recent_transaction_limit, 5);
    }

    #[test]
    fn explicit_data_root_wins() {
        let config = Config {
            default_data_root: Some(PathBuf::from("/tmp/duit-test")),
            ..Config::default()
        };
        assert_eq!(config.resolve_data_root(), PathBuf::from("/tmp/duit-test"));
    }
}
