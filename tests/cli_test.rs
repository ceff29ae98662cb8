use std::path::Path;
use std::process::{Command, Output};

fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_health-audio"))
        .args(args)
        // Keep the user's real config out of the run
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run health-audio")
}

#[test]
fn test_help_lists_options() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = run_cli(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--spanish-file"));
    assert!(stdout.contains("--languages"));
}

#[test]
fn test_missing_voice_models_exit_non_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("out");
    let voices = dir.path().join("voices");

    let output = run_cli(
        dir.path(),
        &[
            "--engine",
            "piper",
            "--voices-dir",
            voices.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    assert!(!out.exists() || std::fs::read_dir(&out).unwrap().next().is_none());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Initialization error"));
}

#[test]
fn test_invalid_config_file_exit_non_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("config.json");
    std::fs::write(&config, "{ broken").expect("write");

    let output = run_cli(dir.path(), &["--config", config.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration error"));
}

#[test]
fn test_unknown_language_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = run_cli(dir.path(), &["--languages", "klingon"]);
    assert!(!output.status.success());
}

#[test]
fn test_init_config_writes_loadable_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("custom/config.json");

    let output = run_cli(
        dir.path(),
        &["--init-config", "--config", config.to_str().unwrap()],
    );
    assert!(output.status.success());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).expect("read config"))
            .expect("valid json");
    assert_eq!(written["engine"], "piper");
    assert_eq!(written["languages"]["tagalog"]["fallback"], true);
}

#[test]
fn test_unreadable_text_file_exit_non_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.txt");

    let output = run_cli(
        dir.path(),
        &["--spanish-file", missing.to_str().unwrap()],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Text input error"));
}
