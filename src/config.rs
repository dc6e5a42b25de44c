//! Server configuration.
//!
//! Values are assembled in three layers, the last one read winning:
//! built-in defaults, an optional YAML file, then command-line flags (each of
//! which can also come from a `PAGESERVER_*` environment variable).
//!
//! ```yaml
//! port: 8000
//! document_root: pages
//! debug: true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::error::ServerError;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DOCUMENT_ROOT: &str = "pages";

/// Ports at or below this are reserved by the operating system.
pub const RESERVED_PORT_LIMIT: u16 = 1000;

/// Command-line interface of the `pageserver` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "pageserver")]
#[command(about = "Minimal concurrent file server for a single document root")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "PAGESERVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "PAGESERVER_PORT")]
    pub port: Option<u16>,

    /// Directory that request paths are resolved beneath
    #[arg(short, long = "docroot", env = "PAGESERVER_DOCROOT")]
    pub document_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, env = "PAGESERVER_DEBUG")]
    pub debug: bool,
}

/// Contents of the YAML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub document_root: Option<PathBuf>,
    pub debug: Option<bool>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("invalid YAML configuration")
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_yaml(&text)
    }
}

/// Immutable server configuration, built once at startup and shared
/// read-only with every connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub document_root: PathBuf,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            document_root: PathBuf::from(DEFAULT_DOCUMENT_ROOT),
            debug: false,
        }
    }
}

impl Config {
    /// Parses the process arguments and environment into a validated config.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Layers defaults, the config file named by `cli` (if any) and the CLI
    /// values, then validates the result.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let mut cfg = Config::default();

        if let Some(path) = &cli.config {
            cfg.apply_file(FileConfig::read(path)?);
        }
        cfg.apply_cli(&cli);

        Ok(cfg.validate()?)
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(root) = file.document_root {
            self.document_root = root;
        }
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(root) = &cli.document_root {
            self.document_root = root.clone();
        }
        // A flag can only switch debugging on.
        self.debug |= cli.debug;
    }

    /// Checks the port range and turns `document_root` into a canonical,
    /// absolute directory path.
    pub fn validate(mut self) -> Result<Self, ServerError> {
        if self.port == 0 {
            return Err(ServerError::Config("port must be in 1..=65535".to_string()));
        }

        let root = fs::canonicalize(&self.document_root).map_err(|e| {
            ServerError::Config(format!(
                "document root {}: {}",
                self.document_root.display(),
                e
            ))
        })?;

        if !root.is_dir() {
            return Err(ServerError::Config(format!(
                "document root {} is not a directory",
                root.display()
            )));
        }

        self.document_root = root;
        Ok(self)
    }

    pub fn is_reserved_port(&self) -> bool {
        self.port <= RESERVED_PORT_LIMIT
    }
}
