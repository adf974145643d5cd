//! Typed views over the two manifest documents the launcher reads.
//!
//! - The **version index** lists every published version with the URL of its
//!   per-version manifest (`versions[].id`, `versions[].url`).
//! - A **version manifest** lists the client download and the dependency
//!   libraries (`downloads.client`, `libraries[].downloads.artifact`).
//!
//! All views borrow from a decoded [`JsonValue`]. Missing fields mean absence,
//! never an error: an index entry without `url` or a library without
//! `downloads.artifact` is skipped.

use crate::types::JsonValue;
use std::path::{Component, Path, PathBuf};

/// One entry of the version index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry<'a> {
    pub id: &'a str,
    pub url: &'a str,
    /// `release`, `snapshot`, `old_beta`, ...
    pub kind: Option<&'a str>,
    pub release_time: Option<&'a str>,
}

/// The index's `latest` pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestVersions<'a> {
    pub release: Option<&'a str>,
    pub snapshot: Option<&'a str>,
}

/// Every usable entry of `versions[]`, in document order.
pub fn versions(index: &JsonValue) -> Vec<VersionEntry<'_>> {
    let Some(entries) = index.get("versions").and_then(JsonValue::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(JsonValue::as_text)?;
            let url = entry.get("url").and_then(JsonValue::as_text)?;
            Some(VersionEntry {
                id,
                url,
                kind: entry.get("type").and_then(JsonValue::as_text),
                release_time: entry.get("releaseTime").and_then(JsonValue::as_text),
            })
        })
        .collect()
}

/// Resolve a version id to its manifest URL. The first matching entry wins.
pub fn find_manifest_url<'a>(index: &'a JsonValue, version: &str) -> Option<&'a str> {
    let entries = index.get("versions")?.as_array()?;
    entries.iter().find_map(|entry| {
        let id = entry.get("id")?.as_text()?;
        if id != version {
            return None;
        }
        entry.get("url")?.as_text()
    })
}

pub fn latest(index: &JsonValue) -> Option<LatestVersions<'_>> {
    let latest = index.get("latest")?.as_object()?;
    Some(LatestVersions {
        release: latest.get("release").and_then(JsonValue::as_text),
        snapshot: latest.get("snapshot").and_then(JsonValue::as_text),
    })
}

/// A downloadable file: a library jar or the client jar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact<'a> {
    /// `/`-separated path relative to the libraries directory. Empty for the client.
    pub path: &'a str,
    pub url: &'a str,
    pub sha1: Option<&'a str>,
    pub size: Option<u64>,
}

impl<'a> Artifact<'a> {
    fn from_value(value: &'a JsonValue, path: &'a str) -> Option<Self> {
        Some(Self {
            path,
            url: value.get("url")?.as_text()?,
            sha1: value.get("sha1").and_then(JsonValue::as_text),
            size: value.get("size").and_then(JsonValue::as_u64),
        })
    }

    /// Where this artifact lives under `root`.
    ///
    /// The manifest path is split on `/` and joined one segment at a time.
    /// Empty, `.` and `..` segments are dropped so the result stays under `root`.
    pub fn local_path(&self, root: &Path) -> PathBuf {
        let mut out = root.to_path_buf();
        for segment in self.path.split('/') {
            if matches!(Path::new(segment).components().next(), Some(Component::Normal(_))) {
                out.push(segment);
            }
        }
        out
    }

    /// Last path segment, e.g. `guava-33.3.1-jre.jar`.
    pub fn file_name(&self) -> &'a str {
        self.path.rsplit('/').next().unwrap_or(self.path)
    }
}

/// Every library with a resolvable `downloads.artifact.{path,url}`, in manifest order.
pub fn library_artifacts(manifest: &JsonValue) -> Vec<Artifact<'_>> {
    let Some(libraries) = manifest.get("libraries").and_then(JsonValue::as_array) else {
        tracing::debug!("manifest has no libraries array");
        return Vec::new();
    };
    libraries
        .iter()
        .enumerate()
        .filter_map(|(i, library)| {
            let artifact = library.path("downloads.artifact");
            let resolved = artifact.and_then(|a| {
                let path = a.get("path")?.as_text()?;
                Artifact::from_value(a, path)
            });
            if resolved.is_none() {
                let name = library.get("name").and_then(JsonValue::as_text).unwrap_or("<unnamed>");
                tracing::debug!(index = i, name, "skipping library without downloadable artifact");
            }
            resolved
        })
        .collect()
}

/// The client jar described by `downloads.client`.
pub fn client_download(manifest: &JsonValue) -> Option<Artifact<'_>> {
    Artifact::from_value(manifest.path("downloads.client")?, "")
}
