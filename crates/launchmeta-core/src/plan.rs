//! Launch planning: what to download, and the command that starts the client.
//!
//! Planning is pure. The caller passes an `exists` probe for on-disk state, so
//! the same plan can be computed against the real filesystem or a fixture.
//!
//! There are two launch paths. [`plan_launch`] starts the vanilla client with
//! the libraries its manifest lists. [`plan_loader_launch`] starts the client
//! through an installed mod loader, with the libraries the loader's installer
//! laid out (see [`LoaderInstall`]).

use crate::config::LauncherConfig;
use crate::error::{LaunchmetaError, Result};
use crate::loader::LoaderInstall;
use crate::manifest::{client_download, library_artifacts};
use crate::types::JsonValue;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A file to fetch before launching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub url: String,
    pub dest: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub version: String,
    /// Missing files in execution order: the client jar first, then libraries.
    pub downloads: Vec<Download>,
    /// Libraries first, then the client jar (and the loader jar, if any).
    pub classpath: Vec<PathBuf>,
    pub main_class: String,
    pub game_args: Vec<String>,
    /// Directory the client process is started in.
    pub working_dir: PathBuf,
}

/// Build the plan for launching `version` from its decoded manifest.
///
/// The client URL comes from the configured releases first and falls back to
/// the manifest's `downloads.client`. Returns [`LaunchmetaError::UnknownVersion`]
/// if neither provides one.
pub fn plan_launch<F>(
    config: &LauncherConfig,
    version: &str,
    manifest: &JsonValue,
    game_dir: &Path,
    exists: F,
) -> Result<LaunchPlan>
where
    F: Fn(&Path) -> bool,
{
    let client_url = config
        .client_url(version)
        .or_else(|| client_download(manifest).map(|a| a.url))
        .ok_or_else(|| LaunchmetaError::UnknownVersion(version.to_string()))?;
    let (client_jar, mut downloads) =
        locate_client_jar(config, version, client_url, game_dir, &exists);
    let libraries_root = game_dir.join(&config.libraries_dir);

    let mut classpath = Vec::new();
    for artifact in library_artifacts(manifest) {
        let dest = artifact.local_path(&libraries_root);
        if !exists(&dest) {
            downloads.push(Download {
                url: artifact.url.to_string(),
                dest: dest.clone(),
            });
        }
        classpath.push(dest);
    }
    classpath.push(client_jar);

    tracing::debug!(
        version,
        downloads = downloads.len(),
        classpath = classpath.len(),
        "planned launch"
    );

    Ok(LaunchPlan {
        version: version.to_string(),
        downloads,
        classpath,
        main_class: config.main_class.clone(),
        game_args: game_args(config, version),
        working_dir: game_dir.to_path_buf(),
    })
}

/// Build the plan for launching `version` through the installed mod loader.
///
/// Only [`LoaderConfig::version`](crate::config::LoaderConfig::version) can
/// be launched this way; any other version fails with
/// [`LaunchmetaError::LoaderUnsupported`]. The client URL comes from the
/// configured releases only. The classpath is every installed library, then
/// the client jar, then the loader jar, and the process runs in the loader's
/// install directory.
pub fn plan_loader_launch<F>(
    config: &LauncherConfig,
    version: &str,
    install: &LoaderInstall,
    game_dir: &Path,
    exists: F,
) -> Result<LaunchPlan>
where
    F: Fn(&Path) -> bool,
{
    let loader = &config.loader;
    if version != loader.version {
        return Err(LaunchmetaError::LoaderUnsupported {
            version: version.to_string(),
            supported: loader.version.clone(),
        });
    }
    let client_url = config
        .client_url(version)
        .ok_or_else(|| LaunchmetaError::UnknownVersion(version.to_string()))?;
    let (client_jar, downloads) =
        locate_client_jar(config, version, client_url, game_dir, &exists);

    let mut classpath = install.libraries.clone();
    classpath.push(client_jar);
    classpath.push(install.loader_jar.clone());

    tracing::debug!(
        version,
        downloads = downloads.len(),
        classpath = classpath.len(),
        "planned loader launch"
    );

    Ok(LaunchPlan {
        version: version.to_string(),
        downloads,
        classpath,
        main_class: loader.main_class.clone(),
        game_args: game_args(config, version),
        working_dir: game_dir.join(&loader.dir),
    })
}

/// The client jar path, and its download if it is not on disk yet.
fn locate_client_jar<F>(
    config: &LauncherConfig,
    version: &str,
    url: &str,
    game_dir: &Path,
    exists: &F,
) -> (PathBuf, Vec<Download>)
where
    F: Fn(&Path) -> bool,
{
    let jar = game_dir.join(config.client_jar_name(version));
    let mut downloads = Vec::new();
    if !exists(&jar) {
        downloads.push(Download {
            url: url.to_string(),
            dest: jar.clone(),
        });
    }
    (jar, downloads)
}

fn game_args(config: &LauncherConfig, version: &str) -> Vec<String> {
    vec![
        "--username".to_string(),
        config.player_name.clone(),
        "--accessToken".to_string(),
        config.access_token.clone(),
        "--version".to_string(),
        version.to_string(),
    ]
}

impl LaunchPlan {
    /// The classpath joined with the platform separator.
    pub fn classpath_string(&self) -> Result<OsString> {
        std::env::join_paths(&self.classpath)
            .map_err(|e| LaunchmetaError::Classpath(e.to_string()))
    }

    /// Full argv: `java -cp <classpath> <main_class> <game_args...>`.
    pub fn command(&self, java: impl Into<OsString>) -> Result<Vec<OsString>> {
        let mut argv = vec![java.into(), OsString::from("-cp"), self.classpath_string()?];
        argv.push(OsString::from(&self.main_class));
        argv.extend(self.game_args.iter().map(OsString::from));
        Ok(argv)
    }
}
