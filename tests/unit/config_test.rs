//! Tests for operator configuration

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use brightminds::adapters::DjangoHasher;
use brightminds::config::{Config, ConfigError};
use serial_test::serial;
use tempfile::TempDir;

fn parse(content: &str) -> Result<Config, ConfigError> {
    Config::parse(content, Path::new("brightminds.toml"))
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn defaults_match_site_layout() {
    let config = Config::default();
    assert_eq!(config.database.path, PathBuf::from("db.sqlite3"));
    assert_eq!(config.media.root, PathBuf::from("media"));
    assert_eq!(config.media.url, "/media/");
    assert_eq!(config.media.substitute, "gallery_media/sample_image.svg");
    assert!(config.auth.allow_inactive);
    assert_eq!(config.auth.hasher_iterations, DjangoHasher::DEFAULT_ITERATIONS);
    assert!(config.source.is_none());
}

#[test]
fn relative_paths_resolve_against_config_dir() {
    let content = r#"
[database]
path = "backend/db.sqlite3"

[media]
root = "/srv/media"
url = "https://cdn.example.com/media/"
"#;
    let config = Config::parse(content, Path::new("/etc/brightminds/brightminds.toml")).unwrap();

    assert_eq!(config.database.path, PathBuf::from("/etc/brightminds/backend/db.sqlite3"));
    assert_eq!(config.media.root, PathBuf::from("/srv/media"));
    assert_eq!(config.media.url, "https://cdn.example.com/media/");
    assert_eq!(config.media.substitute, "gallery_media/sample_image.svg");
}

#[test]
fn partial_sections_keep_defaults() {
    let config = parse("[auth]\nallow_inactive = false\n").unwrap();

    assert!(!config.auth.allow_inactive);
    assert_eq!(config.auth.hasher_iterations, DjangoHasher::DEFAULT_ITERATIONS);
    assert_eq!(config.database.path, PathBuf::from("db.sqlite3"));
}

#[test]
fn unknown_keys_are_rejected() {
    let result = parse("[media]\nroot = \"media\"\nbucket = \"s3\"\n");
    assert!(matches!(result, Err(ConfigError::Parse { .. })));

    let result = parse("[cache]\nttl = 5\n");
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn zero_iterations_are_invalid() {
    let result = parse("[auth]\nhasher_iterations = 0\n");
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn absolute_substitute_is_invalid() {
    let result = parse("[media]\nsubstitute = \"/tmp/x.svg\"\n");
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn overrides_replace_file_values() {
    let content = "[database]\npath = \"db.sqlite3\"\n";
    let config = Config::parse(content, Path::new("/site/brightminds.toml"))
        .unwrap()
        .with_database(Some(PathBuf::from("other.sqlite3")))
        .with_media_root(None);

    assert_eq!(config.database.path, PathBuf::from("other.sqlite3"));
    assert_eq!(config.media.root, PathBuf::from("/site/media"));
}

#[test]
fn hasher_uses_configured_iterations() {
    let config = parse("[auth]\nhasher_iterations = 12\n").unwrap();
    assert_eq!(config.hasher().iterations(), 12);
}

// =============================================================================
// LOOKUP
// =============================================================================

#[test]
fn explicit_missing_file_is_read_error() {
    let temp = TempDir::new().unwrap();
    let result = Config::load(Some(temp.path().join("absent.toml").as_path()));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn explicit_file_is_loaded() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ops.toml");
    fs::write(&path, "[media]\nroot = \"uploads\"\n").unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();

    assert_eq!(config.media.root, temp.path().join("uploads"));
    assert_eq!(config.source.as_deref(), Some(path.as_path()));
}

#[test]
#[serial(cwd)]
fn local_file_is_found_in_current_directory() {
    let temp = TempDir::new().unwrap();
    let content = "[database]\npath = \"site.sqlite3\"\n";
    fs::write(temp.path().join("brightminds.toml"), content).unwrap();
    let original = env::current_dir().unwrap();
    env::set_current_dir(temp.path()).unwrap();

    let result = Config::load(None);

    env::set_current_dir(original).unwrap();
    let config = result.unwrap();
    assert_eq!(config.database.path, PathBuf::from("site.sqlite3"));
    assert_eq!(config.source, Some(PathBuf::from("brightminds.toml")));
}

#[test]
#[serial(cwd)]
fn broken_local_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("brightminds.toml"), "[database\n").unwrap();
    let original = env::current_dir().unwrap();
    env::set_current_dir(temp.path()).unwrap();

    let result = Config::load(None);

    env::set_current_dir(original).unwrap();
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}
