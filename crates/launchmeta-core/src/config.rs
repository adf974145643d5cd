//! Launcher configuration.
//!
//! Replaces hard-coded version tables with an explicit structure that is
//! passed into planning. Every field has a default, so a config file only
//! needs the keys it overrides:
//!
//! ```json
//! {
//!   "releases": [{ "version": "1.21.5", "url": "https://example.com/client.jar" }],
//!   "player_name": "Steve"
//! }
//! ```

use crate::error::{LaunchmetaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_INDEX_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

pub const DEFAULT_LOADER_MAIN_CLASS: &str = "net.fabricmc.loader.impl.launch.knot.KnotClient";

/// A version offered in the picker, with the fixed URL of its client jar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRelease {
    pub version: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// URL of the version index document.
    pub index_url: String,
    /// Supported versions in picker order; the first is the default selection.
    pub releases: Vec<ClientRelease>,
    /// Library root, relative to the game directory.
    pub libraries_dir: PathBuf,
    pub player_name: String,
    pub access_token: String,
    pub main_class: String,
    pub min_java_major: u32,
    pub loader: LoaderConfig,
}

/// Layout of an installed mod loader and how it is started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// The one client version the loader can be launched with.
    pub version: String,
    /// Install directory, relative to the game directory. Contains `libraries/`.
    pub dir: PathBuf,
    /// Loader artifacts under `libraries/`, one subdirectory per loader version.
    pub artifact_dir: PathBuf,
    pub main_class: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            version: "1.21.5".to_string(),
            dir: PathBuf::from(".minecraft"),
            artifact_dir: PathBuf::from("net/fabricmc/fabric-loader"),
            main_class: DEFAULT_LOADER_MAIN_CLASS.to_string(),
        }
    }
}

impl LoaderConfig {
    /// `<game_dir>/<dir>/libraries`.
    pub fn libraries_root(&self, game_dir: &Path) -> PathBuf {
        game_dir.join(&self.dir).join("libraries")
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        let release = |version: &str, object: &str| ClientRelease {
            version: version.to_string(),
            url: format!("https://piston-data.mojang.com/v1/objects/{object}/client.jar"),
        };
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            releases: vec![
                release("1.21.5", "b88808bbb3da8d9f453694b5d8f74a3396f1a533"),
                release("1.21.4", "a7e5a6024bfd3cd614625aa05629adf760020304"),
                release("1.21.3", "6f67d19b4467240639cb2c368ffd4b94ba889705"),
            ],
            libraries_dir: PathBuf::from("libraries"),
            player_name: "Player".to_string(),
            access_token: "12345".to_string(),
            main_class: "net.minecraft.client.main.Main".to_string(),
            min_java_major: 21,
            loader: LoaderConfig::default(),
        }
    }
}

impl LauncherConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: LauncherConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LaunchmetaError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.releases.is_empty() {
            return Err(LaunchmetaError::InvalidConfig(
                "releases must list at least one version".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for release in &self.releases {
            if !seen.insert(release.version.as_str()) {
                return Err(LaunchmetaError::InvalidConfig(format!(
                    "duplicate release version {}",
                    release.version
                )));
            }
            if release.url.trim().is_empty() {
                return Err(LaunchmetaError::InvalidConfig(format!(
                    "release {} has an empty url",
                    release.version
                )));
            }
        }
        Ok(())
    }

    pub fn supported_versions(&self) -> impl Iterator<Item = &str> {
        self.releases.iter().map(|r| r.version.as_str())
    }

    pub fn client_url(&self, version: &str) -> Option<&str> {
        self.releases
            .iter()
            .find(|r| r.version == version)
            .map(|r| r.url.as_str())
    }

    /// File name the client jar is stored under in the game directory.
    pub fn client_jar_name(&self, version: &str) -> String {
        format!("minecraft-{version}-client.jar")
    }
}
