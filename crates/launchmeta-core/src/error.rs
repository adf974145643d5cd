//! Error types for decoding, configuration, and launch planning.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in launchmeta-core.
///
/// Decoding has exactly one failure mode ([`LaunchmetaError::MalformedDocument`]);
/// everything below the top-level container is scanned best-effort and never fails.
#[derive(Error, Debug)]
pub enum LaunchmetaError {
    /// The first non-whitespace character was neither `{` nor `[`.
    /// `found` is `None` for empty or all-whitespace input.
    #[error("malformed document: expected '{{' or '[' at top level, found {}", describe_found(.found))]
    MalformedDocument { found: Option<char> },

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was not valid JSON for `LauncherConfig`.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The configuration parsed but is unusable (empty release list, duplicates, ...).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Neither the configuration nor the manifest provides a client download for the version.
    #[error("no client download known for version {0}")]
    UnknownVersion(String),

    /// A classpath entry cannot be joined with the platform path separator.
    #[error("cannot build classpath: {0}")]
    Classpath(String),

    /// The mod loader was requested for a version it is not installed for.
    #[error("mod loader is only available for {supported}, not {version}")]
    LoaderUnsupported { version: String, supported: String },

    /// The loader artifact directory does not exist.
    #[error("mod loader not found in {}", .0.display())]
    LoaderMissing(PathBuf),

    /// The loader artifact directory has no version subdirectories.
    #[error("no mod loader versions in {}", .0.display())]
    LoaderVersionMissing(PathBuf),

    /// The newest loader version directory holds no jar.
    #[error("no mod loader jar in {}", .0.display())]
    LoaderJarMissing(PathBuf),

    /// A directory under the library root could not be listed.
    #[error("failed to list {}: {source}", .path.display())]
    LibraryScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}

/// Convenience alias used throughout launchmeta-core.
pub type Result<T> = std::result::Result<T, LaunchmetaError>;
