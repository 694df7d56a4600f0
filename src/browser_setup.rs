//! Chrome/Chromium detection and automatic installation.
//!
//! The browser strategy needs a Chrome executable. This module resolves one
//! by checking the `CHROME` environment variable, the `PATH`, and well-known
//! install locations, and falls back to downloading Chrome for Testing from
//! Google's CDN. Downloads are cached in `~/.jobscout/chromium/<version>/`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{Result, ScrapeError};

/// JSON API endpoint for Chrome for Testing stable versions.
const CHROME_VERSIONS_URL: &str =
    "https://googlechromelabs.github.io/chrome-for-testing/last-known-good-versions-with-downloads.json";

#[cfg(target_os = "macos")]
const KNOWN_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
];

#[cfg(all(unix, not(target_os = "macos")))]
const KNOWN_PATHS: &[&str] = &[
    "/opt/google/chrome/chrome",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

/// Command names to search in PATH.
const KNOWN_COMMANDS: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Platform identifier for Chrome for Testing downloads.
fn platform_id() -> Result<&'static str> {
    #[cfg(all(target_os = "macos", target_arch = "aarch64"))]
    {
        Ok("mac-arm64")
    }
    #[cfg(all(target_os = "macos", target_arch = "x86_64"))]
    {
        Ok("mac-x64")
    }
    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    {
        Ok("linux64")
    }
    #[cfg(not(any(
        all(target_os = "macos", target_arch = "aarch64"),
        all(target_os = "macos", target_arch = "x86_64"),
        all(target_os = "linux", target_arch = "x86_64"),
    )))]
    {
        Err(ScrapeError::Browser(
            "Unsupported platform for automatic Chrome download".to_string(),
        ))
    }
}

/// Relative path to the Chrome executable inside the extracted archive.
#[cfg(target_os = "macos")]
fn chrome_executable_in_archive(platform: &str) -> String {
    format!(
        "chrome-{}/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing",
        platform
    )
}

#[cfg(all(unix, not(target_os = "macos")))]
fn chrome_executable_in_archive(platform: &str) -> String {
    format!("chrome-{}/chrome", platform)
}

/// Base directory for cached Chrome downloads.
fn cache_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| ScrapeError::Browser("Cannot determine home directory".to_string()))?;
    Ok(home.join(".jobscout").join("chromium"))
}

/// Detects an existing Chrome/Chromium installation on the system.
///
/// Checks the `CHROME` environment variable, well-known command names in
/// PATH, and well-known filesystem paths, in that order.
pub fn detect_chrome() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CHROME") {
        let p = PathBuf::from(&path);
        if p.exists() {
            debug!("Chrome found via CHROME env var: {}", path);
            return Some(p);
        }
    }

    for cmd in KNOWN_COMMANDS {
        if let Ok(path) = which::which(cmd) {
            debug!("Chrome found in PATH: {}", path.display());
            return Some(path);
        }
    }

    for path_str in KNOWN_PATHS {
        let p = Path::new(path_str);
        if p.exists() {
            debug!("Chrome found at known path: {}", path_str);
            return Some(p.to_path_buf());
        }
    }

    None
}

/// Ensures a Chrome executable is available, downloading one if necessary.
pub async fn ensure_chrome() -> Result<PathBuf> {
    if let Some(path) = detect_chrome() {
        info!("Using system Chrome: {}", path.display());
        return Ok(path);
    }

    if let Ok(path) = find_cached_chrome() {
        info!("Using cached Chrome: {}", path.display());
        return Ok(path);
    }

    info!("No Chrome installation found, downloading Chrome for Testing...");
    download_chrome().await
}

/// Looks for a previously downloaded Chrome in the cache directory,
/// preferring the latest version.
fn find_cached_chrome() -> Result<PathBuf> {
    let base = cache_dir()?;
    let platform = platform_id()?;

    let mut versions: Vec<_> = std::fs::read_dir(&base)
        .map_err(|e| ScrapeError::Browser(format!("Failed to read cache dir: {}", e)))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .collect();
    versions.sort_by_key(|entry| std::cmp::Reverse(entry.file_name()));

    for version_dir in versions {
        let exe_path = version_dir
            .path()
            .join(chrome_executable_in_archive(platform));
        if exe_path.exists() {
            return Ok(exe_path);
        }
    }

    Err(ScrapeError::Browser("No cached Chrome found".to_string()))
}

/// Downloads the stable Chrome for Testing build for this platform and
/// extracts it into the cache directory.
async fn download_chrome() -> Result<PathBuf> {
    let platform = platform_id()?;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(CHROME_VERSIONS_URL)
        .send()
        .await
        .map_err(|e| ScrapeError::Browser(format!("Failed to fetch Chrome versions: {}", e)))?
        .json()
        .await
        .map_err(|e| ScrapeError::Browser(format!("Failed to parse Chrome versions JSON: {}", e)))?;

    let stable = body
        .get("channels")
        .and_then(|c| c.get("Stable"))
        .ok_or_else(|| ScrapeError::Browser("No Stable channel in Chrome versions".to_string()))?;

    let version = stable
        .get("version")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ScrapeError::Browser("No version in Stable channel".to_string()))?;

    let download_url = stable
        .get("downloads")
        .and_then(|d| d.get("chrome"))
        .and_then(|c| c.as_array())
        .and_then(|downloads| {
            downloads
                .iter()
                .find(|d| d.get("platform").and_then(|p| p.as_str()) == Some(platform))
        })
        .and_then(|d| d.get("url"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| {
            ScrapeError::Browser(format!(
                "No Chrome download available for platform '{}'",
                platform
            ))
        })?;

    let version_dir = cache_dir()?.join(version);
    std::fs::create_dir_all(&version_dir)
        .map_err(|e| ScrapeError::Browser(format!("Failed to create cache directory: {}", e)))?;

    info!("Downloading Chrome for Testing v{} ({})...", version, platform);
    let archive_bytes = client
        .get(download_url)
        .send()
        .await
        .map_err(|e| ScrapeError::Browser(format!("Failed to download Chrome: {}", e)))?
        .bytes()
        .await
        .map_err(|e| ScrapeError::Browser(format!("Failed to read Chrome download: {}", e)))?;

    extract_archive(&archive_bytes, &version_dir)?;

    let exe_path = version_dir.join(chrome_executable_in_archive(platform));

    #[cfg(unix)]
    if exe_path.exists() {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o755);
        std::fs::set_permissions(&exe_path, perms)
            .map_err(|e| ScrapeError::Browser(format!("Failed to set Chrome permissions: {}", e)))?;
    }

    if !exe_path.exists() {
        warn!(
            "Expected Chrome at {} but not found after extraction",
            exe_path.display()
        );
        return Err(ScrapeError::Browser(format!(
            "Chrome executable not found after extraction at {}",
            exe_path.display()
        )));
    }

    info!("Chrome for Testing v{} installed at {}", version, exe_path.display());
    Ok(exe_path)
}

/// Extracts a zip archive into the target directory, preserving Unix
/// permissions recorded in the archive.
fn extract_archive(bytes: &[u8], target_dir: &Path) -> Result<()> {
    use std::io::{Cursor, Read, Write};

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ScrapeError::Browser(format!("Failed to open zip archive: {}", e)))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| ScrapeError::Browser(format!("Failed to read zip entry {}: {}", i, e)))?;

        let out_path = target_dir.join(file.mangled_name());

        if file.is_dir() {
            std::fs::create_dir_all(&out_path)
                .map_err(|e| ScrapeError::Browser(format!("Failed to create directory: {}", e)))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScrapeError::Browser(format!("Failed to create directory: {}", e)))?;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| ScrapeError::Browser(format!("Failed to read zip entry: {}", e)))?;

        let mut outfile = std::fs::File::create(&out_path)
            .map_err(|e| ScrapeError::Browser(format!("Failed to create file: {}", e)))?;
        outfile
            .write_all(&contents)
            .map_err(|e| ScrapeError::Browser(format!("Failed to write file: {}", e)))?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode)).ok();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_under_home() {
        let dir = cache_dir().unwrap();
        assert!(dir.ends_with(".jobscout/chromium"));
    }

    #[test]
    fn test_known_commands_nonempty() {
        assert!(KNOWN_COMMANDS.contains(&"chromium"));
    }

    #[cfg(any(target_os = "macos", target_os = "linux"))]
    #[test]
    fn test_platform_id_resolves() {
        assert!(platform_id().is_ok());
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_chrome_executable_in_archive_linux() {
        assert_eq!(chrome_executable_in_archive("linux64"), "chrome-linux64/chrome");
    }
}
