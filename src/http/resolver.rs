//! Maps request paths to files beneath the document root.
//!
//! Resolution runs in a fixed order:
//!
//! 1. A path starting with `/..` or `/~` is [`ResolvedPath::Forbidden`],
//!    whether or not anything exists at the concatenated path.
//! 2. The document root and the request path are concatenated as strings,
//!    without normalization.
//! 3. If nothing exists there the result is [`ResolvedPath::NotFound`].
//! 4. An existing candidate is canonicalized and must still lie beneath the
//!    canonical document root, otherwise it is `Forbidden`. This catches
//!    traversals such as `/a/../../etc/passwd` and symlinks that point out
//!    of the root.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Prefixes rejected before touching the filesystem.
const ILLEGAL_PREFIXES: [&str; 2] = ["/..", "/~"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// Canonical path of an existing entry inside the document root
    Safe(PathBuf),
    Forbidden,
    NotFound,
}

/// True if `path` starts with one of the illegal prefixes.
pub fn has_illegal_prefix(path: &str) -> bool {
    ILLEGAL_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Literal concatenation of `document_root` and `resource_path`.
pub fn candidate_path(document_root: &Path, resource_path: &str) -> PathBuf {
    let mut joined = OsString::from(document_root.as_os_str());
    joined.push(resource_path);
    PathBuf::from(joined)
}

/// Resolves `resource_path` against `document_root`.
///
/// The root is canonicalized as well, so a relative or symlinked root
/// compares correctly against the canonical candidate.
pub async fn resolve(resource_path: &str, document_root: &Path) -> ResolvedPath {
    if has_illegal_prefix(resource_path) {
        return ResolvedPath::Forbidden;
    }

    let candidate = candidate_path(document_root, resource_path);

    let resolved = match fs::canonicalize(&candidate).await {
        Ok(path) => path,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::debug!(path = %candidate.display(), error = %e, "Cannot resolve path");
            }
            return ResolvedPath::NotFound;
        }
    };

    let root = match fs::canonicalize(document_root).await {
        Ok(root) => root,
        Err(e) => {
            tracing::warn!(root = %document_root.display(), error = %e, "Document root is unavailable");
            return ResolvedPath::NotFound;
        }
    };

    if resolved.starts_with(&root) {
        ResolvedPath::Safe(resolved)
    } else {
        tracing::warn!(
            path = resource_path,
            resolved = %resolved.display(),
            "Request path escapes the document root"
        );
        ResolvedPath::Forbidden
    }
}
