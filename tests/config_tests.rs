//! Config file tests - defaults written on first run, partial documents, validation

use std::fs;
use std::path::PathBuf;

use tui_blocks::core::Randomizer;
use tui_blocks::GameConfig;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tui-blocks-config-{}-{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_missing_file_is_created_with_defaults() {
    let dir = temp_dir("init");
    let path = dir.join("nested").join("config.json");

    let config = GameConfig::load_or_init(&path).unwrap();

    assert_eq!(config, GameConfig::default());
    assert!(path.exists());
    let reloaded = GameConfig::load_or_init(&path).unwrap();
    assert_eq!(reloaded, config);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_existing_file_is_read() {
    let dir = temp_dir("read");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    fs::write(
        &path,
        r#"{
            "field": { "width": 12, "height": 24 },
            "engine": { "randomizer": "random", "ghost_enabled": false },
            "input": { "key_release_timeout_ms": 0 },
            "scores": { "player_name": "ann", "max_high_scores": 10 }
        }"#,
    )
    .unwrap();

    let config = GameConfig::load_or_init(&path).unwrap();

    assert_eq!((config.field.width, config.field.height), (12, 24));
    assert_eq!(config.engine.randomizer, Randomizer::Uniform);
    assert!(!config.engine.ghost_enabled);
    assert!(config.engine.hold_enabled);
    assert_eq!(config.input.key_release_timeout_ms, 0);
    assert_eq!(config.scores.player_name, "ann");
    assert_eq!(config.scores.max_high_scores, 10);

    let engine_config = config.engine_config();
    assert_eq!(engine_config.width, 12);
    assert!(!engine_config.ghost_enabled);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_invalid_file_reports_path() {
    let dir = temp_dir("invalid");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    fs::write(&path, r#"{ "field": { "height": 2 } }"#).unwrap();

    let err = GameConfig::load_or_init(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("config.json"));
    assert!(message.contains("field must be at least"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_malformed_json_is_an_error() {
    let dir = temp_dir("malformed");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(GameConfig::load_or_init(&path).is_err());

    let _ = fs::remove_dir_all(&dir);
}
