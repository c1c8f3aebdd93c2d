use clap::Parser;
use dupehunter::cli::Cli;
use dupehunter::error::ExitCode;
use dupehunter::run_app;
use std::fs;
use tempfile::tempdir;

use crate::ENV_MUTEX;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("dupehunter").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_run_app_text_report() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a"), b"dup").unwrap();
    fs::write(data.join("b"), b"dup").unwrap();

    let code = run_app(cli(&[
        "-q",
        "--no-color",
        "--config",
        config.to_str().unwrap(),
        "-p",
        data.to_str().unwrap(),
    ]))
    .unwrap();

    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_run_app_json_with_delete_does_not_prompt() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "output = \"json\"").unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a"), b"dup").unwrap();
    fs::write(data.join("b"), b"dup").unwrap();

    let code = run_app(cli(&[
        "-q",
        "-d",
        "--config",
        config.to_str().unwrap(),
        "-p",
        data.to_str().unwrap(),
    ]))
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(data.join("a").exists());
    assert!(data.join("b").exists());
}

#[test]
fn test_run_app_missing_scanlist_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let err = run_app(cli(&[
        "-q",
        "--config",
        config.to_str().unwrap(),
        "-s",
        dir.path().join("missing.txt").to_str().unwrap(),
        "-p",
        dir.path().to_str().unwrap(),
    ]))
    .unwrap_err();

    assert_eq!(ExitCode::from_error(&err), ExitCode::GeneralError);
}

#[test]
fn test_run_app_bad_config_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "io_threads = [").unwrap();

    let result = run_app(cli(&["-q", "--config", config.to_str().unwrap()]));
    assert!(result.is_err());
}

#[test]
fn test_run_app_no_duplicates() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("only"), b"alone").unwrap();

    let code = run_app(cli(&[
        "-q",
        "-d",
        "--config",
        config.to_str().unwrap(),
        "-p",
        data.to_str().unwrap(),
    ]))
    .unwrap();

    assert_eq!(code, ExitCode::Success);
}
