use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no explicit browser path is given
pub const CHROME_PATH_ENV: &str = "CHROME_PATH";

/// Executable names searched on `PATH` after the fixed install locations
const PATH_CANDIDATES: [&str; 4] = [
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// Locates a Chrome or Chromium binary for headless sessions
pub struct BrowserLocator {
    explicit: Option<PathBuf>,
}

impl BrowserLocator {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// Find a usable binary
    ///
    /// An explicit path must be valid; it is never silently replaced by a
    /// default. After that: `CHROME_PATH`, platform install paths, `PATH`.
    pub fn find(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.explicit {
            return validate_executable(path);
        }

        if let Some(path) = std::env::var_os(CHROME_PATH_ENV).map(PathBuf::from) {
            match validate_executable(&path) {
                Ok(valid) => {
                    tracing::debug!("Using browser from {}: {}", CHROME_PATH_ENV, valid.display());
                    return Ok(valid);
                }
                Err(e) => tracing::warn!("Ignoring {}: {}", CHROME_PATH_ENV, e),
            }
        }

        if let Some(path) = install_paths()
            .into_iter()
            .find_map(|p| validate_executable(&p).ok())
        {
            tracing::debug!("Found browser at: {}", path.display());
            return Ok(path);
        }

        if let Some(path) = PATH_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
        {
            tracing::debug!("Found browser on PATH: {}", path.display());
            return Ok(path);
        }

        Err(Error::Browser(format!(
            "Chrome not found. Checked: {}, and {} on PATH. Use --chrome-path to specify location.",
            install_paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            PATH_CANDIDATES.join(", ")
        )))
    }
}

fn install_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    return vec![
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    ];

    #[cfg(target_os = "linux")]
    return vec![
        PathBuf::from("/usr/bin/google-chrome"),
        PathBuf::from("/usr/bin/google-chrome-stable"),
        PathBuf::from("/usr/bin/chromium"),
        PathBuf::from("/usr/bin/chromium-browser"),
        PathBuf::from("/snap/bin/chromium"),
    ];

    #[cfg(target_os = "windows")]
    return vec![
        PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return vec![];
}

fn validate_executable(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(Error::Browser(format!(
            "Chrome not found at: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(path)?.permissions().mode();
        if mode & 0o111 == 0 {
            return Err(Error::Browser(format!(
                "Chrome binary not executable: {}",
                path.display()
            )));
        }
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_executable_is_used() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let found = BrowserLocator::new(Some(path.to_path_buf())).find().unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn test_missing_explicit_path_is_not_replaced() {
        let result = BrowserLocator::new(Some(PathBuf::from("/nonexistent/chrome"))).find();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        let err = BrowserLocator::new(Some(temp.path().to_path_buf()))
            .find()
            .unwrap_err();
        assert!(err.to_string().contains("not executable"));
    }

    #[test]
    fn test_directory_is_not_a_browser() {
        let dir = tempfile::tempdir().unwrap();
        let result = BrowserLocator::new(Some(dir.path().to_path_buf())).find();

        assert!(result.is_err());
    }
}
