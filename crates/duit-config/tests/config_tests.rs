use duit_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.currency, Config::default().currency);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.currency = "USD".to_string();
    cfg.locale = "en-US".to_string();
    cfg.last_opened_book = Some("household".to_string());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.locale, "en-US");
    assert_eq!(loaded.last_opened_book.as_deref(), Some("household"));
}

#[test]
fn backups_can_be_listed_and_restored() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    let backup = manager
        .backup(&cfg, Some("before switch"))
        .expect("create backup");
    assert!(backup.file_name.contains("before-switch"));

    let listed = manager.list_backups().expect("list backups");
    assert!(listed.iter().any(|entry| entry == &backup));

    let restored = manager.restore(&backup.file_name).expect("restore backup");
    assert_eq!(restored.currency, "EUR");
}

#[test]
fn listed_backups_carry_parsed_timestamp_and_note() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    manager
        .backup(&Config::default(), Some("Before Switch"))
        .expect("create backup");

    let listed = manager.list_backups().expect("list backups");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].created_at.is_some());
    assert_eq!(listed[0].note.as_deref(), Some("before-switch"));
}

#[test]
fn restoring_an_unknown_backup_is_a_typed_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let err = manager.restore("config_ghost.json").unwrap_err();
    assert!(matches!(err, ConfigError::BackupNotFound(_)));
}

#[test]
fn with_base_dir_lays_out_the_config_tree() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("create manager");

    manager.save(&Config::default()).expect("save config");
    assert!(dir.path().join("config").join("config.json").exists());
}
