//! Loading, saving and snapshotting of the configuration file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Config, ConfigError};

const STAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// One configuration snapshot, with the creation time and note recovered
/// from its file name at listing time so callers never re-derive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBackup {
    pub file_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

/// Handles persistence and backup management for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf, backups_dir: PathBuf) -> Self {
        Self {
            config_path,
            backups_dir,
        }
    }

    /// Lays the `config/config.json` + `config/backups/` tree out under
    /// `base`, creating the directories as needed.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        let backups_dir = config_dir.join("backups");
        fs::create_dir_all(&backups_dir)?;
        Ok(Self::new(config_dir.join("config.json"), backups_dir))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the stored configuration, falling back to defaults when no file
    /// exists yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match fs::read_to_string(&self.config_path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        write_json_atomically(&self.config_path, config)
    }

    /// Snapshots the configuration into the backups directory. The optional
    /// note is slugged into the file name.
    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<ConfigBackup, ConfigError> {
        let stamp = Utc::now().format(STAMP_FORMAT).to_string();
        let note = note.and_then(note_slug);
        let mut file_name = format!("config_{stamp}");
        if let Some(label) = &note {
            file_name.push('_');
            file_name.push_str(label);
        }
        file_name.push_str(".json");
        write_json_atomically(&self.backups_dir.join(&file_name), config)?;
        // Re-parse the stamp so the returned time matches what a later
        // listing will recover from the file name.
        let created_at = NaiveDateTime::parse_from_str(&stamp, STAMP_FORMAT)
            .ok()
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
        Ok(ConfigBackup {
            file_name,
            created_at,
            note,
        })
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config, ConfigError> {
        let path = self.backups_dir.join(backup_name);
        if !path.exists() {
            return Err(ConfigError::BackupNotFound(backup_name.to_string()));
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Lists snapshots newest first.
    pub fn list_backups(&self) -> Result<Vec<ConfigBackup>, ConfigError> {
        let entries = match fs::read_dir(&self.backups_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut backups = Vec::new();
        for entry in entries {
            let path = entry?.path();
            match path.file_name().and_then(|name| name.to_str()) {
                Some(file_name) if file_name.ends_with(".json") => {
                    backups.push(parse_backup_name(file_name));
                }
                _ => {}
            }
        }
        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });
        Ok(backups)
    }
}

fn write_json_atomically(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, serde_json::to_string_pretty(config)?)?;
    fs::rename(&staging, path)?;
    Ok(())
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

/// Splits `config_<date>_<time>[_<note>].json` back into its parts. Names
/// that do not follow the pattern are kept, with no timestamp or note.
fn parse_backup_name(file_name: &str) -> ConfigBackup {
    let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
    let segments: Vec<&str> = stem.split('_').collect();
    for (index, pair) in segments.windows(2).enumerate() {
        if pair[0].len() != 8 || pair[1].len() != 4 {
            continue;
        }
        let raw = format!("{}{}", pair[0], pair[1]);
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M") {
            return ConfigBackup {
                file_name: file_name.to_string(),
                created_at: Some(DateTime::from_naive_utc_and_offset(naive, Utc)),
                note: segments.get(index + 2).map(|s| s.to_string()),
            };
        }
    }
    ConfigBackup {
        file_name: file_name.to_string(),
        created_at: None,
        note: None,
    }
}
