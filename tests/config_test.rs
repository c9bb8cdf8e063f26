use std::fs;

use nestframe::{AggregateOptions, DataType, Error, FrameConfig, ParserOptions};
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = FrameConfig::default();
    assert_eq!(config.aggregation, AggregateOptions::default());
    assert!(!config.aggregation.skip_na);
    assert_eq!(config.aggregation.ddof, 1);
    assert!(config.parser.trim);
    assert!(config.parser.null_strings.contains(&"NA".to_string()));
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = FrameConfig::from_toml_str(
        r#"
        [aggregation]
        ddof = 0

        [parser]
        skip_types = ["Boolean"]
        "#,
    )
    .unwrap();
    assert_eq!(config.aggregation.ddof, 0);
    assert!(!config.aggregation.skip_na);
    assert_eq!(config.parser.skip_types, vec![DataType::Boolean]);
    assert_eq!(config.parser.null_strings, ParserOptions::default().null_strings);
}

#[test]
fn test_load_from_files() {
    let dir = tempdir().unwrap();

    let toml_path = dir.path().join("frame.toml");
    fs::write(&toml_path, "[aggregation]\nskip_na = true\n").unwrap();
    let config = FrameConfig::from_file(&toml_path).unwrap();
    assert!(config.aggregation.skip_na);

    let json_path = dir.path().join("frame.json");
    fs::write(&json_path, r#"{"parser": {"date_pattern": "%d.%m.%Y"}}"#).unwrap();
    let config = FrameConfig::from_file(&json_path).unwrap();
    assert_eq!(config.parser.date_pattern.as_deref(), Some("%d.%m.%Y"));
}

#[test]
fn test_toml_round_trip() {
    let mut config = FrameConfig::default();
    config.aggregation = config.aggregation.with_skip_na(true).with_ddof(2);
    let text = config.to_toml_string().unwrap();
    assert_eq!(FrameConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_invalid_configuration() {
    assert!(matches!(
        FrameConfig::from_toml_str("[aggregation]\nddof = \"one\""),
        Err(Error::Config(_))
    ));
    let missing = FrameConfig::from_file("/nonexistent/frame.toml");
    assert!(matches!(missing, Err(Error::Io(_))));
}
