// tests/config_test.rs
use release_preflight::config::load_config;
use release_preflight::hooks::LifecyclePoint;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const TOML_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/release-it.toml");
const JSON_FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/release-it-with-upload.json"
);

#[test]
fn test_load_toml_fixture() {
    let config = load_config(Some(TOML_FIXTURE)).unwrap();

    assert_eq!(config.git.tag_name, "v${version}");
    assert_eq!(config.git.commit_message, "Release: v${version}");
    assert_eq!(config.git.tag_annotation, "Release:");
    assert!(config.git.require_clean_working_dir);
    assert_eq!(config.git.require_branch.as_deref(), Some("master"));
    assert!(config.git.require_upstream);
    assert!(config.git.require_commits);
    assert!(!config.npm.publish);
    assert_eq!(
        config.hooks.commands_for(LifecyclePoint::BeforeInit),
        vec!["git fetch --prune --prune-tags origin"]
    );
    assert!(config
        .hooks
        .commands_for(LifecyclePoint::AfterRelease)
        .is_empty());
}

#[test]
fn test_load_json_fixture_with_after_release() {
    let config = load_config(Some(JSON_FIXTURE)).unwrap();

    assert_eq!(
        config.hooks.commands_for(LifecyclePoint::AfterRelease),
        vec![
            "python setup.py sdist bdist_wheel",
            "twine upload dist/*",
            "rm -rf build dist",
        ]
    );
    assert_eq!(config.git.require_branch.as_deref(), Some("master"));
    assert!(config.validate().unwrap().is_empty());
}

#[test]
fn test_fixtures_differ_only_by_after_release() {
    let toml_config = load_config(Some(TOML_FIXTURE)).unwrap();
    let json_config = load_config(Some(JSON_FIXTURE)).unwrap();

    assert_eq!(toml_config.git, json_config.git);
    assert_eq!(toml_config.npm, json_config.npm);
    assert_ne!(toml_config.hooks, json_config.hooks);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[git]
requireBranch = "main"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.git.require_branch.as_deref(), Some("main"));
    assert_eq!(config.git.tag_name, "${version}");
    assert!(config.git.commit);
    assert!(config.git.tag);
    assert!(config.git.push);
    assert_eq!(config.git.push_repo, "origin");
    assert_eq!(config.npm.publish_path, ".");
}

#[test]
fn test_invalid_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[git\nrequireBranch = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_wrong_value_type_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[git]\nrequireUpstream = \"yes\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
fn test_missing_explicit_file_is_error() {
    let missing = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/does-not-exist.toml");
    let err = load_config(Some(missing)).unwrap_err();
    assert!(err.to_string().contains("does-not-exist.toml"));
}

#[test]
#[serial]
fn test_local_toml_preferred_over_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".release-it.toml"),
        "[git]\ntagName = \"toml-${version}\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".release-it.json"),
        r#"{ "git": { "tagName": "json-${version}" } }"#,
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.unwrap().git.tag_name, "toml-${version}");
}

#[test]
#[serial]
fn test_local_json_discovered() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".release-it.json"),
        r#"{ "hooks": { "after:release": "echo done" } }"#,
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(
        config
            .unwrap()
            .hooks
            .commands_for(LifecyclePoint::AfterRelease),
        vec!["echo done"]
    );
}
