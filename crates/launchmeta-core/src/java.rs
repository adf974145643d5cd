//! Java runtime discovery and version checks from `java -version` output.

use std::path::{Path, PathBuf};

/// Executables to try, in order. With a non-empty `JAVA_HOME` these are
/// `$JAVA_HOME/bin/java` and `$JAVA_HOME/bin/java.exe`; otherwise plain
/// `java`, resolved through `PATH`.
pub fn candidates(java_home: Option<&Path>) -> Vec<PathBuf> {
    match java_home {
        Some(home) if !home.as_os_str().is_empty() => {
            let bin = home.join("bin");
            vec![bin.join("java"), bin.join("java.exe")]
        }
        _ => vec![PathBuf::from("java")],
    }
}

/// First line of `java -version` output that mentions a version.
pub fn find_version_line(output: &str) -> Option<&str> {
    output
        .lines()
        .find(|line| line.to_ascii_lowercase().contains("version"))
}

/// Major version from a banner line such as `openjdk version "21.0.2" 2024-01-16`.
///
/// Reads the first quoted token. The legacy `1.x` scheme maps to `x`
/// (`"1.8.0_292"` is 8).
pub fn parse_java_major(line: &str) -> Option<u32> {
    let (_, rest) = line.split_once('"')?;
    let (token, _) = rest.split_once('"')?;
    let mut parts = token.split(['.', '_', '-', '+']);
    let major: u32 = parts.next()?.parse().ok()?;
    if major == 1 {
        return parts.next()?.parse().ok();
    }
    Some(major)
}

pub fn meets_minimum(line: &str, min_major: u32) -> bool {
    parse_java_major(line).is_some_and(|major| major >= min_major)
}
