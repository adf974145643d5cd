//! # launchmeta-core
//!
//! Lenient JSON decoding and manifest handling for a game-client launcher.
//!
//! The launcher reads two remote documents: a version index that maps version
//! ids to manifest URLs, and a per-version manifest that lists the client jar
//! and its libraries. Both are trusted and well-formed in practice, so the
//! decoder here is a best-effort scanner that never fails on inner structure.
//!
//! ## Quick start
//!
//! ```rust
//! use launchmeta_core::{decode, find_manifest_url};
//!
//! let index = decode(r#"{"versions":[{"id":"1.21.5","url":"u1"},{"id":"1.21.4","url":"u2"}]}"#).unwrap();
//! assert_eq!(find_manifest_url(&index, "1.21.4"), Some("u2"));
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — text → [`JsonValue`] (fast or quote-aware scanning, raw or unescaped strings)
//! - [`encoder`] — [`JsonValue`] → text, in the decoder's scalar convention
//! - [`types`] — `JsonValue` tree and order-preserving `Object`
//! - [`manifest`] — version index and library artifact views
//! - [`config`] — `LauncherConfig` (version table, paths, launch identity)
//! - [`plan`] — downloads, classpath and argv for a launch
//! - [`loader`] — installed mod-loader discovery
//! - [`java`] — Java executable candidates and `java -version` parsing
//! - [`error`] — error types

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod java;
pub mod loader;
pub mod manifest;
pub mod plan;
pub mod types;

pub use config::{ClientRelease, LauncherConfig, LoaderConfig};
pub use decoder::{
    decode, decode_array, decode_array_with, decode_object, decode_object_with, decode_with,
    DecodeOptions, Decoder, ScanMode, StringMode, DEFAULT_MAX_DEPTH,
};
pub use encoder::{encode, encode_escaped, encode_pretty};
pub use error::LaunchmetaError;
pub use loader::LoaderInstall;
pub use manifest::{
    client_download, find_manifest_url, latest, library_artifacts, versions, Artifact,
    LatestVersions, VersionEntry,
};
pub use plan::{plan_launch, plan_loader_launch, Download, LaunchPlan};
pub use types::{JsonValue, Kind, Object};
