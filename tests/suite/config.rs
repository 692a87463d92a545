//! Loading the config file from disk and feeding it to the app.

use std::fs;

use tempfile::tempdir;

use ctf_engine::{App, ConfigError, TerminalConfig};

#[test]
fn missing_file_means_defaults() {
    let dir = tempdir().expect("tempdir");
    let loaded = TerminalConfig::load_from(&dir.path().join("config.toml")).expect("load");
    assert!(loaded.is_none());

    let app = App::new(loaded.as_ref()).expect("builtin catalog");
    assert_eq!(app.user(), "alex");
}

#[test]
fn file_settings_reach_the_app() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[app]\nhigh_contrast = true\n\n[terminal]\nhost = \"ctf-lab\"\nbanner = []\n",
    )
    .expect("write config");

    let config = TerminalConfig::load_from(&path)
        .expect("load")
        .expect("config present");
    let app = App::new(Some(&config)).expect("builtin catalog");

    assert!(app.ui_options().high_contrast);
    assert!(!app.ui_options().ascii_only);
    assert_eq!(app.host(), "ctf-lab");
    assert_eq!(app.user(), "alex");
    assert!(app.transcript().is_empty());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[app\nascii_only = yes\n").expect("write config");

    let err = TerminalConfig::load_from(&path).expect_err("parse error");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), &path);
}
