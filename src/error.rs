//! Error taxonomy for the page server.
//!
//! Only [`ServerError::Bind`] and [`ServerError::Config`] are fatal; they are
//! raised at startup before any connection is accepted. Everything else is
//! scoped to a single connection and handled inside its task.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ServerError {
    /// The listening socket could not be created or bound.
    Bind { port: u16, source: io::Error },
    /// The configuration is unusable (bad port, missing document root, ...).
    Config(String),
    /// The request could not be decoded or has no method/path pair.
    MalformedRequest(String),
    /// The transport failed while a response was being sent.
    Send(io::Error),
    /// A resolved file could not be read.
    FileRead { path: PathBuf, source: io::Error },
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind { port, .. } => write!(f, "failed to bind port {}", port),
            ServerError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            ServerError::MalformedRequest(raw) => write!(f, "malformed request: {:?}", raw),
            ServerError::Send(_) => write!(f, "failed to send response"),
            ServerError::FileRead { path, .. } => {
                write!(f, "failed to read {}", path.display())
            }
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind { source, .. } => Some(source),
            ServerError::Send(source) => Some(source),
            ServerError::FileRead { source, .. } => Some(source),
            ServerError::Config(_) | ServerError::MalformedRequest(_) => None,
        }
    }
}
