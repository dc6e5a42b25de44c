mod common;

use std::path::PathBuf;

use clap::Parser;
use common::DocRoot;
use pageserver::config::{Cli, Config, FileConfig};
use pageserver::error::ServerError;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["pageserver"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_config_from_cli_flags() {
    let root = DocRoot::new();
    let docroot = root.path().to_str().unwrap();

    let cfg = Config::from_cli(cli(&["--port", "9000", "--docroot", docroot, "--debug"])).unwrap();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.document_root, root.path());
    assert!(cfg.debug);
}

#[test]
fn test_config_file_then_cli_precedence() {
    let root = DocRoot::new();
    let yaml = format!(
        "port: 7000\ndocument_root: {}\ndebug: true\n",
        root.path().display()
    );
    let file = root.write_outside("pageserver.yaml", yaml);
    let file = file.to_str().unwrap();

    let from_file = Config::from_cli(cli(&["--config", file])).unwrap();
    assert_eq!(from_file.port, 7000);
    assert!(from_file.debug);
    assert_eq!(from_file.document_root, root.path());

    let overridden = Config::from_cli(cli(&["--config", file, "--port", "7001"])).unwrap();
    assert_eq!(overridden.port, 7001);
    assert_eq!(overridden.document_root, root.path());
}

#[test]
fn test_relative_document_root_is_made_absolute() {
    let root = DocRoot::new();
    root.mkdir("sub");
    let mut cfg = Config {
        port: 8000,
        document_root: root.path().join("sub").join(".."),
        debug: false,
    };

    cfg = cfg.validate().unwrap();

    assert!(cfg.document_root.is_absolute());
    assert_eq!(cfg.document_root, root.path());
}

#[test]
fn test_port_zero_is_rejected() {
    let root = DocRoot::new();
    let cfg = Config {
        port: 0,
        document_root: root.path().to_path_buf(),
        debug: false,
    };

    assert!(matches!(cfg.validate(), Err(ServerError::Config(_))));
}

#[test]
fn test_missing_document_root_is_rejected() {
    let cfg = Config {
        port: 8000,
        document_root: PathBuf::from("/definitely/not/a/real/docroot"),
        debug: false,
    };

    assert!(matches!(cfg.validate(), Err(ServerError::Config(_))));
}

#[test]
fn test_file_as_document_root_is_rejected() {
    let root = DocRoot::new();
    let file = root.write("index.html", "home");
    let cfg = Config {
        port: 8000,
        document_root: file,
        debug: false,
    };

    assert!(matches!(cfg.validate(), Err(ServerError::Config(_))));
}

#[test]
fn test_yaml_keys_are_optional() {
    let file = FileConfig::from_yaml("port: 8080\n").unwrap();
    assert_eq!(file.port, Some(8080));
    assert!(file.document_root.is_none());
    assert!(file.debug.is_none());

    let empty = FileConfig::from_yaml("").unwrap();
    assert!(empty.port.is_none());
}

#[test]
fn test_yaml_rejects_unknown_keys_and_bad_ports() {
    assert!(FileConfig::from_yaml("prot: 8080\n").is_err());
    assert!(FileConfig::from_yaml("port: 70000\n").is_err());
}

#[test]
fn test_unreadable_config_file_is_error() {
    let root = DocRoot::new();
    let missing = root.path().join("missing.yaml");
    let missing = missing.to_str().unwrap();

    let result = Config::from_cli(cli(&["--config", missing]));
    assert!(result.is_err());
}

#[test]
fn test_out_of_range_port_flag_fails_to_parse() {
    assert!(Cli::try_parse_from(["pageserver", "--port", "65536"]).is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1, cfg2);
}
