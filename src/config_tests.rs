use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use super::*;

#[test]
fn test_config_path_returns_config_location() {
    let path = config_path();
    assert!(path.is_some());
    let path = path.unwrap();
    assert!(path.to_string_lossy().contains(".config/idpc-autocomplete"));
    assert!(path.to_string_lossy().ends_with("config.toml"));
}

#[test]
fn test_load_config_from_path_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.toml");

    let content = r##"
api_key = "iddqd"

[output_fields]
line_1 = "#line_1"
postcode = "#postcode,#postcode2"
"##;

    let mut file = fs::File::create(&file_path).unwrap();
    file.write_all(content.as_bytes()).unwrap();

    let options = load_config(Some(&file_path)).unwrap();
    assert_eq!(options.api_key, "iddqd");
    assert_eq!(options.output_fields.len(), 2);
    assert_eq!(options.output_fields["postcode"].len(), 2);
    assert!(options.validate().is_ok());
}

#[test]
fn test_load_config_from_path_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.toml");
    fs::File::create(&file_path).unwrap();

    let options = load_config(Some(&file_path)).unwrap();
    assert_eq!(options, ControllerOptions::default());
}

#[test]
fn test_load_config_explicit_missing_file_is_error() {
    let path = PathBuf::from("/nonexistent/path/config.toml");
    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/path/config.toml"));
}

#[test]
fn test_parse_config_invalid_syntax() {
    let err = parse_config("this is not valid toml { [ }").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_parse_config_wrong_type() {
    let err = parse_config("check_key = \"yes\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_parse_config_hash_selectors() {
    let options = parse_config(
        r##"
api_key = "iddqd"
input_field = "#search"

[output_fields]
line_1 = "#line_1"
line_2 = ["#line_2", "#address_2"]
post_town = "#post_town,#town"
"##,
    )
    .unwrap();

    assert_eq!(options.input_field.as_deref(), Some("#search"));
    assert_eq!(
        options.output_fields["line_1"].iter().collect::<Vec<_>>(),
        vec!["#line_1"]
    );
    assert_eq!(
        options.output_fields["line_2"].iter().collect::<Vec<_>>(),
        vec!["#line_2", "#address_2"]
    );
    assert_eq!(
        options.output_fields["post_town"].iter().collect::<Vec<_>>(),
        vec!["#post_town", "#town"]
    );
    assert!(options.validate().is_ok());
}

#[test]
fn test_validate_missing_api_key() {
    let options = ControllerOptions::default();
    assert!(matches!(options.validate(), Err(ConfigError::MissingApiKey)));

    let options = ControllerOptions::new("   ");
    assert!(matches!(options.validate(), Err(ConfigError::MissingApiKey)));
}

#[test]
fn test_validate_unknown_attribute() {
    let options = ControllerOptions::new("iddqd")
        .with_output("line_1", "#line_1")
        .with_output("favourite_colour", "#colour");
    match options.validate() {
        Err(ConfigError::UnknownAttribute(name)) => assert_eq!(name, "favourite_colour"),
        other => panic!("expected UnknownAttribute, got {:?}", other),
    }
}

#[test]
fn test_config_error_display() {
    assert!(ConfigError::MissingApiKey.to_string().contains("api_key"));
    assert!(
        ConfigError::UnknownAttribute("foo".to_string())
            .to_string()
            .contains("foo")
    );
}
