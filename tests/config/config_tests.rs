// Config tests - inline JSON and TOML file loading
//
// Covers defaults, partial overrides and every validation error.

use chatdock_core::{ConfigError, WidgetConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("widget.toml");
    fs::write(&path, content).expect("Failed to write widget.toml");
    path
}

#[test]
fn blank_inline_config_means_defaults() {
    assert_eq!(WidgetConfig::from_json("").unwrap(), WidgetConfig::default());
    assert_eq!(WidgetConfig::from_json("  \n").unwrap(), WidgetConfig::default());
    assert_eq!(WidgetConfig::from_json("{}").unwrap(), WidgetConfig::default());
}

#[test]
fn default_values() {
    let config = WidgetConfig::default();
    assert_eq!(config.endpoint, "/api/bookbot");
    assert_eq!(config.storage_key, "bookbot_widget_ui_v1");
    assert_eq!(config.default_width, 360.0);
    assert_eq!(config.default_height, 520.0);
    assert_eq!(config.margin, 8.0);
    assert_eq!(config.greeting, None);
}

#[test]
fn partial_inline_config_keeps_other_defaults() {
    let config = WidgetConfig::from_json(
        r#"{"endpoint": " https://shop.example/api/bookbot ", "title": "Book helper"}"#,
    )
    .unwrap();

    assert_eq!(config.endpoint, "https://shop.example/api/bookbot");
    assert_eq!(config.title, "Book helper");
    assert_eq!(config.storage_key, "bookbot_widget_ui_v1");
    assert_eq!(config.default_width, 360.0);
}

#[test]
fn invalid_inline_json_is_rejected() {
    let result = WidgetConfig::from_json("{endpoint: nope}");
    assert!(matches!(result, Err(ConfigError::Json(_))));

    let result = WidgetConfig::from_json(r#"{"margin": "wide"}"#);
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn blank_greeting_is_dropped() {
    let config = WidgetConfig::from_json(r#"{"greeting": "   "}"#).unwrap();
    assert_eq!(config.greeting, None);

    let config = WidgetConfig::from_json(r#"{"greeting": "Xin chào!"}"#).unwrap();
    assert_eq!(config.greeting.as_deref(), Some("Xin chào!"));
}

#[test]
fn empty_endpoint_is_rejected() {
    let result = WidgetConfig::from_json(r#"{"endpoint": "   "}"#);
    assert!(matches!(result, Err(ConfigError::EmptyEndpoint)));
}

#[test]
fn empty_storage_key_is_rejected() {
    let result = WidgetConfig::from_json(r#"{"storage_key": ""}"#);
    assert!(matches!(result, Err(ConfigError::EmptyStorageKey)));
}

#[test]
fn default_size_below_floor_is_rejected() {
    let result = WidgetConfig::from_json(r#"{"default_width": 200}"#);
    assert!(matches!(
        result,
        Err(ConfigError::DefaultBelowMinimum { width, min_width, .. })
            if width == 200.0 && min_width == 300.0
    ));

    let result = WidgetConfig::from_json(r#"{"default_height": 379.5}"#);
    assert!(matches!(result, Err(ConfigError::DefaultBelowMinimum { .. })));
}

#[test]
fn negative_margin_is_rejected() {
    let result = WidgetConfig::from_json(r#"{"margin": -1}"#);
    assert!(matches!(result, Err(ConfigError::InvalidMargin(m)) if m == -1.0));
}

#[test]
fn returns_error_when_file_not_found() {
    let result = WidgetConfig::load(Path::new("/nonexistent/path/widget.toml"));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn loads_toml_file() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
endpoint = "http://127.0.0.1:5000/api/bookbot"
greeting = "Chào bạn, mình có thể giúp gì?"
default_width = 400
margin = 12
"#,
    );

    let config = WidgetConfig::load(&path).unwrap();
    assert_eq!(config.endpoint, "http://127.0.0.1:5000/api/bookbot");
    assert_eq!(config.greeting.as_deref(), Some("Chào bạn, mình có thể giúp gì?"));
    assert_eq!(config.default_width, 400.0);
    assert_eq!(config.default_height, 520.0);
    assert_eq!(config.margin, 12.0);
}

#[test]
fn returns_parse_error_for_invalid_toml() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "endpoint = [unclosed");

    let result = WidgetConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn file_values_are_validated() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "storage_key = \"  \"\n");

    let result = WidgetConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::EmptyStorageKey)));
}

#[test]
fn default_state_uses_configured_size() {
    let config = WidgetConfig::from_json(r#"{"default_width": 420, "default_height": 600}"#).unwrap();
    let state = config.default_state();
    assert!(!state.open);
    assert_eq!((state.x, state.y), (None, None));
    assert_eq!((state.w, state.h), (420.0, 600.0));
}
