// tests/config_test.rs
use git_release::config::{load_config, Config, LOCAL_CONFIG_FILE};
use git_release::ReleaseError;
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_explicit_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
remote = "upstream"

[coverage]
threshold = 75
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let base = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), base.path()).unwrap();
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.coverage.threshold, 75);
    // untouched sections keep their defaults
    assert_eq!(config.manifest, PathBuf::from("pyproject.toml"));
    assert_eq!(config.commands, Config::default().commands);
}

#[test]
fn test_load_fixture() {
    let base = TempDir::new().unwrap();
    let config = load_config(Some(Path::new("tests/fixtures/release.toml")), base.path())
        .expect("Failed to load test config");

    assert_eq!(config.manifest, PathBuf::from("packaging/pyproject.toml"));
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.coverage.threshold, 90);
    assert_eq!(config.commands.install.len(), 1);
    assert_eq!(config.commands.test, vec!["python", "-m", "pytest"]);
    assert!(config
        .commands
        .coverage
        .contains(&"--cov=voxtus".to_string()));
}

#[test]
#[serial]
fn test_local_file_in_base_dir_is_found() {
    let base = TempDir::new().unwrap();
    std::fs::write(
        base.path().join(LOCAL_CONFIG_FILE),
        "manifest = \"setup.toml\"\n",
    )
    .unwrap();

    let config = load_config(None, base.path()).unwrap();
    assert_eq!(config.manifest, PathBuf::from("setup.toml"));
}

#[test]
fn test_explicit_file_beats_local_file() {
    let base = TempDir::new().unwrap();
    std::fs::write(base.path().join(LOCAL_CONFIG_FILE), "remote = \"local\"\n").unwrap();

    let mut explicit = NamedTempFile::new().unwrap();
    explicit.write_all(b"remote = \"explicit\"\n").unwrap();
    explicit.flush().unwrap();

    let config = load_config(Some(explicit.path()), base.path()).unwrap();
    assert_eq!(config.remote, "explicit");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let base = TempDir::new().unwrap();
    let missing = base.path().join("nope.toml");
    let err = load_config(Some(&missing), base.path()).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
#[serial]
fn test_invalid_local_file_is_an_error() {
    let base = TempDir::new().unwrap();
    std::fs::write(
        base.path().join(LOCAL_CONFIG_FILE),
        "[coverage]\nthreshold = \"high\"\n",
    )
    .unwrap();

    assert!(load_config(None, base.path()).is_err());
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_user_config_is_used_without_local_file() {
    let config_home = TempDir::new().unwrap();
    std::fs::write(
        config_home.path().join(".release.toml"),
        "remote = \"from-user-config\"\n",
    )
    .unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", config_home.path());

    let base = TempDir::new().unwrap();
    let result = load_config(None, base.path());

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(result.unwrap().remote, "from-user-config");
}
