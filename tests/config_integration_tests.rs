//! Tests for configuration discovery and layering
use std::fs;
use std::path::Path;

use clap::Parser;
use snip_doclint::config::{find_project_config, Args, Config, PROJECT_CONFIG_FILE};
use snip_doclint::rules::{RuleId, DEFAULT_HEADINGS};

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["snip-doclint"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).expect("parse args")
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write file");
}

#[test]
fn test_defaults_without_config_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::resolve(args(&[]), dir.path(), None).expect("resolve");

    assert!(!config.has_project_config());
    assert!(config.sources.is_empty());
    for rule in RuleId::ALL {
        assert!(config.options.is_enabled(rule));
    }
    assert_eq!(config.options.heading_vocabulary, DEFAULT_HEADINGS);
    assert_eq!(config.paths, vec![dir.path().to_path_buf()]);
}

#[test]
fn test_project_config_found_in_ancestor() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        &dir.path().join(PROJECT_CONFIG_FILE),
        "[rules]\ndisabled = [\"heading-recognition\"]\n",
    );
    let nested = dir.path().join("contracts").join("src");
    fs::create_dir_all(&nested).expect("create nested dir");

    assert_eq!(
        find_project_config(&nested),
        Some(dir.path().join(PROJECT_CONFIG_FILE))
    );

    let config = Config::resolve(args(&[]), &nested, None).expect("resolve");
    assert!(config.has_project_config());
    assert!(!config.options.is_enabled(RuleId::HeadingRecognition));
    assert!(config.options.is_enabled(RuleId::ItemDocAdjacency));
}

#[test]
fn test_layering_priority() {
    let dir = tempfile::tempdir().expect("tempdir");
    let user = dir.path().join("user").join("config.toml");
    write(
        &user,
        "[rules]\ndisabled = [\"heading-format\"]\n\n[headings]\nextend = [\"Events\"]\n",
    );
    let project = dir.path().join("project");
    write(
        &project.join(PROJECT_CONFIG_FILE),
        "[headings]\nvocabulary = [\"Arguments\", \"Returns\"]\n",
    );
    let explicit = dir.path().join("strict.toml");
    write(&explicit, "[rules]\nenabled = [\"item-doc-adjacency\", \"heading-format\"]\n");

    let config = Config::resolve(
        args(&[
            "--config",
            explicit.to_str().expect("utf-8 path"),
            "--enable",
            "module-doc-position",
            "--heading",
            "Safety",
        ]),
        &project,
        Some(&user),
    )
    .expect("resolve");

    assert_eq!(config.sources, vec![user, project.join(PROJECT_CONFIG_FILE), explicit]);
    // Project vocabulary replaced the user's extension; the CLI heading was appended.
    assert_eq!(
        config.options.heading_vocabulary,
        vec!["Arguments", "Returns", "Safety"]
    );
    // The explicit file replaced the enabled set; the CLI flag added to it.
    assert!(config.options.is_enabled(RuleId::ItemDocAdjacency));
    assert!(config.options.is_enabled(RuleId::HeadingFormat));
    assert!(config.options.is_enabled(RuleId::ModuleDocPosition));
    assert!(!config.options.is_enabled(RuleId::HeadingRecognition));
}

#[test]
fn test_isolated_ignores_user_and_project_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let user = dir.path().join("user.toml");
    write(&user, "[rules]\nenabled = []\n");
    write(&dir.path().join(PROJECT_CONFIG_FILE), "[rules]\nenabled = []\n");

    let config = Config::resolve(args(&["--isolated"]), dir.path(), Some(&user)).expect("resolve");

    assert!(config.sources.is_empty());
    assert_eq!(config.options.enabled_rules.len(), RuleId::ALL.len());
}

#[test]
fn test_invalid_config_is_an_error_naming_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        &dir.path().join(PROJECT_CONFIG_FILE),
        "[rules]\nenabled = [\"no-such-rule\"]\n",
    );

    let err = Config::resolve(args(&[]), dir.path(), None).expect_err("invalid config");
    assert!(format!("{:#}", err).contains(PROJECT_CONFIG_FILE));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.toml");

    let result = Config::resolve(
        args(&["--isolated", "--config", missing.to_str().expect("utf-8 path")]),
        dir.path(),
        None,
    );
    assert!(result.is_err());
}
