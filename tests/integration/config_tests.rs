use clap::Parser;
use dupehunter::actions::DeleteMethod;
use dupehunter::cli::{Cli, OutputFormat};
use dupehunter::config::{Config, ConfigError};
use std::fs;
use tempfile::tempdir;

use crate::ENV_MUTEX;

fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("DUPEHUNTER_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_config_load_from_toml() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
io_threads = 8
follow_symlinks = true
extensions = ["jpg", "png"]
use_trash = true
output = "json"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&path).unwrap();

    assert_eq!(config.io_threads, 8);
    assert!(config.follow_symlinks);
    assert!(!config.skip_hidden);
    assert_eq!(config.extensions, vec!["jpg", "png"]);
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.delete_method(), DeleteMethod::Trash);
}

#[test]
fn test_config_hierarchy_file_env_cli() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "io_threads = 8\nskip_hidden = true\n").unwrap();

    std::env::set_var("DUPEHUNTER_IO_THREADS", "12");
    let mut config = Config::load_from_path(&path).unwrap();
    std::env::remove_var("DUPEHUNTER_IO_THREADS");

    assert_eq!(config.io_threads, 12);
    assert!(config.skip_hidden);

    let cli = Cli::try_parse_from(["dupehunter", "--io-threads", "2"]).unwrap();
    config.merge_cli(&cli);
    assert_eq!(config.io_threads, 2);
    assert!(config.skip_hidden);
}

#[test]
fn test_config_missing_explicit_file_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let err = Config::load_from_path(&dir.path().join("nonexistent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_config_invalid_toml_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "invalid = toml").unwrap();

    let err = Config::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn test_config_wrong_type_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "io_threads = \"many\"").unwrap();

    assert!(Config::load_from_path(&path).is_err());
}

#[test]
fn test_config_serializes_back_to_toml() {
    let config = Config {
        io_threads: 2,
        extensions: vec!["mp3".to_string()],
        ..Default::default()
    };

    let content = toml::to_string_pretty(&config).unwrap();
    assert!(content.contains("io_threads = 2"));
    assert!(content.contains("output = \"text\""));
    assert!(content.contains("mp3"));
}
