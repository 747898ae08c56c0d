use crate::Result;
use std::path::Path;
use tempfile::TempDir;

/// Throwaway Chrome user-data directory, one per session
///
/// Removed explicitly by [`ProfileDir::remove`] once the browser has
/// exited, or on drop as a fallback.
pub struct ProfileDir {
    dir: Option<TempDir>,
}

impl ProfileDir {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("scholarly-profile-")
            .tempdir()?;

        tracing::debug!("Created browser profile at {}", dir.path().display());

        Ok(Self { dir: Some(dir) })
    }

    /// Profile directory path; `None` after removal
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Delete the directory now. Safe to call more than once.
    pub fn remove(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        let path = dir.path().to_path_buf();
        if let Err(e) = dir.close() {
            tracing::warn!(
                "Failed to remove browser profile {}: {}",
                path.display(),
                e
            );
        }
    }
}
