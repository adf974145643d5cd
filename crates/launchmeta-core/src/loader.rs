//! Discovery of an installed mod loader.
//!
//! The loader's installer is run out of process; what it leaves behind is a
//! library tree:
//!
//! ```text
//! <game_dir>/.minecraft/libraries/
//!     net/fabricmc/fabric-loader/<loader version>/fabric-loader-<loader version>.jar
//!     <every other library the installer fetched>
//! ```
//!
//! [`LoaderInstall::locate`] reads that tree once. Planning from the result
//! is pure (see [`crate::plan_loader_launch`]).

use crate::config::LoaderConfig;
use crate::error::{LaunchmetaError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// What the loader launch needs from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderInstall {
    /// First jar, by name, of the newest loader version directory.
    pub loader_jar: PathBuf,
    /// Every jar under the library root, depth-first in name order.
    pub libraries: Vec<PathBuf>,
}

impl LoaderInstall {
    /// Inspect the loader's library root under `game_dir`.
    ///
    /// Loader versions are compared by directory name, so the last one in
    /// lexical order wins. Each missing piece has its own error:
    /// [`LaunchmetaError::LoaderMissing`] for the artifact directory,
    /// [`LaunchmetaError::LoaderVersionMissing`] when it has no version
    /// subdirectory, [`LaunchmetaError::LoaderJarMissing`] when the newest
    /// version holds no jar.
    pub fn locate(config: &LoaderConfig, game_dir: &Path) -> Result<Self> {
        let libraries_root = config.libraries_root(game_dir);
        let artifact_dir = libraries_root.join(&config.artifact_dir);
        if !artifact_dir.is_dir() {
            return Err(LaunchmetaError::LoaderMissing(artifact_dir));
        }

        let newest = sorted_entries(&artifact_dir)?
            .into_iter()
            .filter(|path| path.is_dir())
            .next_back()
            .ok_or_else(|| LaunchmetaError::LoaderVersionMissing(artifact_dir.clone()))?;

        let loader_jar = sorted_entries(&newest)?
            .into_iter()
            .find(|path| is_jar(path))
            .ok_or_else(|| LaunchmetaError::LoaderJarMissing(newest.clone()))?;

        let mut libraries = Vec::new();
        collect_jars(&libraries_root, &mut libraries)?;

        tracing::debug!(
            loader = %loader_jar.display(),
            libraries = libraries.len(),
            "located mod loader"
        );

        Ok(Self {
            loader_jar,
            libraries,
        })
    }
}

fn is_jar(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "jar")
}

/// Directory entries sorted by path.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let scan_error = |source| LaunchmetaError::LibraryScan {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        entries.push(entry.map_err(scan_error)?.path());
    }
    entries.sort();
    Ok(entries)
}

fn collect_jars(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            collect_jars(&path, out)?;
        } else if is_jar(&path) {
            out.push(path);
        }
    }
    Ok(())
}
