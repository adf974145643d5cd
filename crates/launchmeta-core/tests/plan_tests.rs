use launchmeta_core::{decode, plan_launch, LaunchmetaError, LauncherConfig};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const MANIFEST: &str = r#"{
  "downloads": {"client": {"url": "https://manifest/client.jar"}},
  "libraries": [
    {"downloads": {"artifact": {"path": "a/one.jar", "url": "https://lib/one.jar"}}},
    {"name": "natives-only"},
    {"downloads": {"artifact": {"path": "b/two.jar", "url": "https://lib/two.jar"}}}
  ]
}"#;

fn game_dir() -> PathBuf {
    PathBuf::from("game")
}

fn nothing_exists(_: &Path) -> bool {
    false
}

#[test]
fn fresh_install_downloads_everything_client_first() {
    let config = LauncherConfig::default();
    let manifest = decode(MANIFEST).unwrap();
    let plan = plan_launch(&config, "1.21.5", &manifest, &game_dir(), nothing_exists).unwrap();

    let urls: Vec<&str> = plan.downloads.iter().map(|d| d.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            config.client_url("1.21.5").unwrap(),
            "https://lib/one.jar",
            "https://lib/two.jar",
        ]
    );
    assert_eq!(
        plan.downloads[0].dest,
        game_dir().join("minecraft-1.21.5-client.jar")
    );
    assert_eq!(
        plan.downloads[1].dest,
        game_dir().join("libraries").join("a").join("one.jar")
    );
    assert_eq!(plan.working_dir, game_dir());
}

#[test]
fn existing_files_are_not_downloaded_but_stay_on_classpath() {
    let config = LauncherConfig::default();
    let manifest = decode(MANIFEST).unwrap();
    let present: HashSet<PathBuf> = [
        game_dir().join("minecraft-1.21.4-client.jar"),
        game_dir().join("libraries").join("a").join("one.jar"),
    ]
    .into_iter()
    .collect();

    let plan = plan_launch(&config, "1.21.4", &manifest, &game_dir(), |p| {
        present.contains(p)
    })
    .unwrap();

    assert_eq!(plan.downloads.len(), 1);
    assert_eq!(plan.downloads[0].url, "https://lib/two.jar");
    assert_eq!(
        plan.classpath,
        vec![
            game_dir().join("libraries").join("a").join("one.jar"),
            game_dir().join("libraries").join("b").join("two.jar"),
            game_dir().join("minecraft-1.21.4-client.jar"),
        ]
    );
}

#[test]
fn unknown_version_falls_back_to_manifest_client() {
    let config = LauncherConfig::default();
    let manifest = decode(MANIFEST).unwrap();
    let plan = plan_launch(&config, "1.20.1", &manifest, &game_dir(), nothing_exists).unwrap();
    assert_eq!(plan.downloads[0].url, "https://manifest/client.jar");
}

#[test]
fn unknown_version_without_manifest_client_fails() {
    let config = LauncherConfig::default();
    let manifest = decode(r#"{"libraries":[]}"#).unwrap();
    let err = plan_launch(&config, "1.20.1", &manifest, &game_dir(), nothing_exists).unwrap_err();
    assert!(matches!(err, LaunchmetaError::UnknownVersion(v) if v == "1.20.1"));
}

#[test]
fn command_line_shape() {
    let config = LauncherConfig {
        player_name: "Steve".to_string(),
        ..LauncherConfig::default()
    };
    let manifest = decode(MANIFEST).unwrap();
    let plan = plan_launch(&config, "1.21.5", &manifest, &game_dir(), nothing_exists).unwrap();
    let argv = plan.command("java").unwrap();

    assert_eq!(argv[0], OsString::from("java"));
    assert_eq!(argv[1], OsString::from("-cp"));
    let entries: Vec<PathBuf> = std::env::split_paths(&argv[2]).collect();
    assert_eq!(entries, plan.classpath);
    let tail: Vec<&str> = argv[3..].iter().map(|s| s.to_str().unwrap()).collect();
    assert_eq!(
        tail,
        [
            "net.minecraft.client.main.Main",
            "--username",
            "Steve",
            "--accessToken",
            "12345",
            "--version",
            "1.21.5",
        ]
    );
}

#[cfg(unix)]
#[test]
fn classpath_entry_with_separator_is_rejected() {
    let config = LauncherConfig {
        libraries_dir: PathBuf::from("bad:dir"),
        ..LauncherConfig::default()
    };
    let manifest = decode(MANIFEST).unwrap();
    let plan = plan_launch(&config, "1.21.5", &manifest, &game_dir(), nothing_exists).unwrap();
    assert!(matches!(
        plan.classpath_string(),
        Err(LaunchmetaError::Classpath(_))
    ));
}
