//! File-level conversion tests for the detheme front end.

use std::fs;
use std::path::PathBuf;

use detheme::{app, Args, Config, Terminals};
use tempfile::TempDir;
use uuid::Uuid;

const THEME: &str = r##"{
    "name": "Ember",
    "author": "Jane Doe",
    "variables": { "orange": "#f80", "dark": "hsl(0, 0%, 10%)" },
    "globals": {
        "foreground": "var(orange)",
        "background": "var(dark)"
    },
    "rules": [
        { "name": "Comment", "scope": "comment", "foreground": "rgba(255, 136, 0, 0.5)" }
    ]
}"##;

fn setup(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Ember.sublime-color-scheme");
    fs::write(&input, contents).unwrap();
    (dir, input)
}

fn config_for(input: PathBuf, output: Option<PathBuf>, uuid: Option<Uuid>) -> Config {
    Config::resolve(
        Args {
            theme_file: Some(input),
            output,
            no_color: true,
            uuid,
            completion: None,
            generate_man: false,
        },
        None,
        Terminals::NONE,
    )
    .unwrap()
}

#[test]
fn writes_next_to_input_by_default() {
    let (dir, input) = setup(THEME);
    let config = config_for(input, None, None);

    let theme = app::run(&config).unwrap();
    assert_eq!(theme.name, "Ember");

    let expected = dir.path().join("Ember.tmTheme");
    assert_eq!(config.output, expected);

    let out = fs::read_to_string(expected).unwrap();
    assert!(out.contains("<key>foreground</key>\n          <string>#ff8800</string>"));
    assert!(out.contains("<key>background</key>\n          <string>#1a1a1a</string>"));
    assert!(out.contains("<string>#ff880080</string>"));
}

#[test]
fn honors_explicit_output_and_uuid() {
    let (dir, input) = setup(THEME);
    let output = dir.path().join("custom.tmTheme");
    let uuid = Uuid::from_u128(42);
    let config = config_for(input, Some(output.clone()), Some(uuid));

    app::run(&config).unwrap();
    let first = fs::read(&output).unwrap();
    app::run(&config).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert!(String::from_utf8(first)
        .unwrap()
        .contains(&format!("<string>{}</string>", uuid)));
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path().join("absent.sublime-color-scheme"), None, None);

    let err = app::load(&config).unwrap_err();
    assert!(format!("{:#}", err).starts_with("Can't load theme"));
}

#[test]
fn malformed_input_is_reported_and_nothing_written() {
    let (dir, input) = setup("{ not json");
    let config = config_for(input, None, None);

    let err = app::run(&config).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Can't load theme"));
    assert!(message.contains("Malformed JSON"));
    assert!(!dir.path().join("Ember.tmTheme").exists());
}

#[test]
fn unwritable_output_is_reported() {
    let (dir, input) = setup(THEME);
    let output = dir.path().join("missing-dir").join("out.tmTheme");
    let config = config_for(input, Some(output), None);

    let err = app::run(&config).unwrap_err();
    assert!(format!("{:#}", err).starts_with("Can't save theme"));
}
