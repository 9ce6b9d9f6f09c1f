//! Integration tests for Settings config loading with layered precedence.
//!
//! These tests pass an explicit global path (inside a temp directory) so the
//! user's real XDG config never leaks in.

use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use orgchart::config::{Settings, SettingsError};
use orgchart::domain::{RenderStyle, MAX_INDENT};

#[rstest]
fn given_no_config_files_when_loading_then_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_layers(Some(&dir.path().join("missing.toml")), None)
        .expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[rstest]
fn given_global_config_when_loading_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("orgchart.toml");
    fs::write(
        &global,
        r#"
ceo = "Ada"

[render]
indent = 2
style = "tree"
"#,
    )
    .unwrap();

    let settings = Settings::load_layers(Some(&global), None).expect("load settings");

    assert_eq!(settings.ceo.as_deref(), Some("Ada"));
    assert_eq!(settings.render.indent, 2);
    assert_eq!(settings.render.style, RenderStyle::Tree);
    assert_eq!(settings.render.marker, "- ", "unspecified marker keeps default");
}

#[rstest]
fn given_global_and_explicit_file_when_loading_then_explicit_file_wins() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("orgchart.toml");
    let local = dir.path().join("local.toml");
    fs::write(
        &global,
        r#"
ceo = "Ada"

[render]
indent = 2
marker = "* "
"#,
    )
    .unwrap();
    fs::write(
        &local,
        r#"
[render]
indent = 4
"#,
    )
    .unwrap();

    let settings = Settings::load_layers(Some(&global), Some(&local)).expect("load settings");

    assert_eq!(settings.ceo.as_deref(), Some("Ada"), "inherited from global");
    assert_eq!(settings.render.marker, "* ", "inherited from global");
    assert_eq!(settings.render.indent, 4, "overridden by explicit file");
}

#[rstest]
fn given_missing_explicit_file_when_loading_then_returns_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = Settings::load_layers(None, Some(&missing)).unwrap_err();

    assert!(matches!(err, SettingsError::NotFound(ref p) if p == &missing));
}

#[rstest]
fn given_malformed_file_when_loading_then_returns_config_error() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[render]\nindent = \"wide\"\n").unwrap();

    let err = Settings::load_layers(None, Some(&bad)).unwrap_err();

    match err {
        SettingsError::Config { message } => assert!(message.contains("bad.toml"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case("17")]
#[case("4096")]
fn given_oversized_indent_when_loading_then_returns_config_error(#[case] indent: &str) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("wide.toml");
    fs::write(&file, format!("[render]\nindent = {indent}\n")).unwrap();

    let err = Settings::load_layers(None, Some(&file)).unwrap_err();

    match err {
        SettingsError::Config { message } => {
            assert!(message.contains("render.indent"), "{message}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn given_indent_at_limit_when_loading_then_is_accepted() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("wide.toml");
    fs::write(&file, format!("[render]\nindent = {MAX_INDENT}\n")).unwrap();

    let settings = Settings::load_layers(None, Some(&file)).expect("load settings");

    assert_eq!(settings.render.indent, MAX_INDENT);
}
