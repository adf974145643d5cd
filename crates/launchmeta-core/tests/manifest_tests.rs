use launchmeta_core::{
    client_download, decode, find_manifest_url, latest, library_artifacts, versions, Artifact,
    LatestVersions,
};
use std::path::Path;

/// Helper: a trimmed-down version index in the upstream layout.
const INDEX: &str = r#"{
  "latest": {"release": "1.21.5", "snapshot": "25w14a"},
  "versions": [
    {"id": "25w14a", "type": "snapshot", "url": "https://meta/25w14a.json", "releaseTime": "2025-04-02T09:33:11+00:00"},
    {"id": "1.21.5", "type": "release", "url": "https://meta/1.21.5.json", "releaseTime": "2025-03-25T12:14:58+00:00"},
    {"id": "1.21.4", "type": "release", "url": "https://meta/1.21.4.json"},
    {"id": "broken", "type": "release"}
  ]
}"#;

const MANIFEST: &str = r#"{
  "id": "1.21.5",
  "downloads": {
    "client": {"sha1": "b88808bbb3da8d9f453694b5d8f74a3396f1a533", "size": 28468344, "url": "https://piston-data/client.jar"}
  },
  "libraries": [
    {"downloads": {"artifact": {"path": "com/google/guava/guava/33.3.1-jre/guava-33.3.1-jre.jar", "sha1": "852f8b363da0111e819460021ca693cacca3e8db", "size": 3180692, "url": "https://libraries/guava-33.3.1-jre.jar"}}, "name": "com.google.guava:guava:33.3.1-jre"},
    {"name": "org.lwjgl:lwjgl:3.3.3:natives-linux", "rules": [{"action": "allow"}]},
    {"downloads": {"classifiers": {}}, "name": "no-artifact"},
    {"downloads": {"artifact": {"path": "org/lwjgl/lwjgl/3.3.3/lwjgl-3.3.3.jar", "url": "https://libraries/lwjgl-3.3.3.jar"}}, "name": "org.lwjgl:lwjgl:3.3.3"}
  ]
}"#;

// ============================================================================
// Version index
// ============================================================================

#[test]
fn find_url_for_version() {
    let index =
        decode(r#"{"versions":[{"id":"1.21.5","url":"u1"},{"id":"1.21.4","url":"u2"}]}"#).unwrap();
    assert_eq!(find_manifest_url(&index, "1.21.4"), Some("u2"));
    assert_eq!(find_manifest_url(&index, "1.21.5"), Some("u1"));
    assert_eq!(find_manifest_url(&index, "1.20"), None);
}

#[test]
fn find_url_compares_numeric_ids_as_text() {
    let index = decode(r#"{"versions":[{"id":1.5,"url":"numeric"}]}"#).unwrap();
    assert_eq!(find_manifest_url(&index, "1.5"), Some("numeric"));
    assert_eq!(find_manifest_url(&index, "1.50"), None);
}

#[test]
fn find_url_first_match_wins() {
    let index =
        decode(r#"{"versions":[{"id":"x","url":"first"},{"id":"x","url":"second"}]}"#).unwrap();
    assert_eq!(find_manifest_url(&index, "x"), Some("first"));
}

#[test]
fn find_url_tolerates_missing_versions() {
    assert_eq!(find_manifest_url(&decode("{}").unwrap(), "1.21.5"), None);
    assert_eq!(
        find_manifest_url(&decode(r#"{"versions":"nope"}"#).unwrap(), "1.21.5"),
        None
    );
    assert_eq!(find_manifest_url(&decode("[]").unwrap(), "1.21.5"), None);
}

#[test]
fn versions_skip_entries_without_url() {
    let index = decode(INDEX).unwrap();
    let entries = versions(&index);
    let ids: Vec<&str> = entries.iter().map(|v| v.id).collect();
    assert_eq!(ids, ["25w14a", "1.21.5", "1.21.4"]);
    assert_eq!(entries[0].kind, Some("snapshot"));
    assert_eq!(entries[1].release_time, Some("2025-03-25T12:14:58+00:00"));
    assert_eq!(entries[2].release_time, None);
}

#[test]
fn latest_pointers() {
    let index = decode(INDEX).unwrap();
    let pointers: LatestVersions = latest(&index).unwrap();
    assert_eq!(pointers.release, Some("1.21.5"));
    assert_eq!(pointers.snapshot, Some("25w14a"));
    assert!(latest(&decode("{}").unwrap()).is_none());
}

// ============================================================================
// Libraries
// ============================================================================

#[test]
fn library_without_downloads_is_skipped() {
    let manifest = decode(
        r#"{"libraries":[{"downloads":{"artifact":{"path":"a/b.jar","url":"http://h/b.jar"}}},{"name":"no-downloads-field"}]}"#,
    )
    .unwrap();
    let artifacts = library_artifacts(&manifest);
    assert_eq!(
        artifacts,
        vec![Artifact {
            path: "a/b.jar",
            url: "http://h/b.jar",
            sha1: None,
            size: None,
        }]
    );
}

#[test]
fn full_manifest_libraries() {
    let manifest = decode(MANIFEST).unwrap();
    let artifacts = library_artifacts(&manifest);
    assert_eq!(artifacts.len(), 2);

    let guava = &artifacts[0];
    assert_eq!(guava.file_name(), "guava-33.3.1-jre.jar");
    assert_eq!(guava.sha1, Some("852f8b363da0111e819460021ca693cacca3e8db"));
    assert_eq!(guava.size, Some(3_180_692));

    assert_eq!(artifacts[1].path, "org/lwjgl/lwjgl/3.3.3/lwjgl-3.3.3.jar");
    assert_eq!(artifacts[1].url, "https://libraries/lwjgl-3.3.3.jar");
}

#[test]
fn artifact_missing_url_is_skipped() {
    let manifest =
        decode(r#"{"libraries":[{"downloads":{"artifact":{"path":"a/b.jar"}}}]}"#).unwrap();
    assert!(library_artifacts(&manifest).is_empty());
}

#[test]
fn manifest_without_libraries_yields_nothing() {
    assert!(library_artifacts(&decode(r#"{"id":"x"}"#).unwrap()).is_empty());
}

#[test]
fn client_download_reads_downloads_client() {
    let manifest = decode(MANIFEST).unwrap();
    let client = client_download(&manifest).unwrap();
    assert_eq!(client.url, "https://piston-data/client.jar");
    assert_eq!(client.size, Some(28_468_344));
    assert_eq!(client.path, "");
    assert!(client_download(&decode("{}").unwrap()).is_none());
}

// ============================================================================
// Local placement
// ============================================================================

#[test]
fn local_path_joins_segments_under_root() {
    let artifact = Artifact {
        path: "org/lwjgl/lwjgl/3.3.3/lwjgl-3.3.3.jar",
        url: "u",
        sha1: None,
        size: None,
    };
    let expected = Path::new("libraries")
        .join("org")
        .join("lwjgl")
        .join("lwjgl")
        .join("3.3.3")
        .join("lwjgl-3.3.3.jar");
    assert_eq!(artifact.local_path(Path::new("libraries")), expected);
}

#[test]
fn local_path_cannot_escape_root() {
    let artifact = Artifact {
        path: "../../etc//./passwd",
        url: "u",
        sha1: None,
        size: None,
    };
    assert_eq!(
        artifact.local_path(Path::new("libs")),
        Path::new("libs").join("etc").join("passwd")
    );
}
