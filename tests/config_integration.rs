//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use stagehand::config::AppConfig;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

/// Scratch config directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stagehand-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ===== Shipped configuration =====

#[test]
#[serial]
fn test_default_file_matches_defaults() {
    let config = AppConfig::load().unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.clock.start_hour, defaults.clock.start_hour);
    assert_eq!(config.clock.minute_duration, defaults.clock.minute_duration);
    assert_eq!(config.scene.path, defaults.scene.path);
    assert_eq!(config.input.axes, defaults.input.axes);
}

// ===== Environment overrides =====

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SH_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SH_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_override_clock() {
    std::env::set_var("SH_CLOCK__MINUTE_DURATION", "0.1");
    std::env::set_var("SH_CLOCK__START_MINUTE", "9");
    let config = AppConfig::load();
    std::env::remove_var("SH_CLOCK__MINUTE_DURATION");
    std::env::remove_var("SH_CLOCK__START_MINUTE");

    let config = config.unwrap();
    assert!((config.clock.minute_duration - 0.1).abs() < 1e-6);
    assert!(config.clock.to_clock().reads(10, 9));
}

#[test]
#[serial]
fn test_env_invalid_value_rejected() {
    std::env::set_var("SH_CLOCK__START_HOUR", "24");
    let result = AppConfig::load();
    std::env::remove_var("SH_CLOCK__START_HOUR");

    let err = result.unwrap_err();
    assert!(err.to_string().contains("start_hour"));
}

// ===== File layering =====

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = scratch_dir("layering");
    fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"Default\"\nwidth = 800\nheight = 600\nfullscreen = false\n",
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        "[window]\ntitle = \"Mine\"\nwidth = 800\nheight = 600\nfullscreen = true\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.window.title, "Mine");
    assert!(config.window.fullscreen);
    // Sections absent from both files keep their defaults
    assert_eq!(config.clock.start_hour, 10);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.width, 1280);
    assert!(config.input.axes.contains("Horizontal2"));
}

#[test]
#[serial]
fn test_custom_axes_from_file() {
    let dir = scratch_dir("axes");
    fs::write(
        dir.join("default.toml"),
        r#"
[[input.axes]]
name = "Vertical1"
positive = ["KeyI"]
negative = ["KeyK"]

[[input.axes]]
name = "Horizontal1"
positive = ["KeyL"]
negative = ["KeyJ"]
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.input.axes.len(), 2);
    assert!(!config.input.axes.contains("Vertical2"));
    let vertical = config.input.axes.get("Vertical1").unwrap();
    assert_eq!(vertical.positive, vec![stagehand_core::KeyCode::KeyI]);
}
