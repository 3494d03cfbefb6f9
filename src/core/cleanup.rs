//! Removal of the generator's own directory from a generated project.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::paths;
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupStatus {
    Removed,
    NotPresent,
    Skipped,
    Failed,
}

/// Delete `<target>/scripts`. Runs synchronously; callers sequence it last.
pub fn remove_generator(target: &Path) -> Result<CleanupStatus> {
    let dir = paths::generator_dir(target);
    let removed = io::remove_dir_all(&dir, "remove generator scripts")?;

    if removed {
        crate::log_status!("clean-up", "Removed {}", dir.display());
        Ok(CleanupStatus::Removed)
    } else {
        Ok(CleanupStatus::NotPresent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn removes_scripts_directory_only() {
        let target = TempDir::new().unwrap();
        fs::create_dir_all(target.path().join("scripts/generate/templates")).unwrap();
        fs::create_dir_all(target.path().join("src")).unwrap();

        let status = remove_generator(target.path()).unwrap();

        assert_eq!(status, CleanupStatus::Removed);
        assert!(!target.path().join("scripts").exists());
        assert!(target.path().join("src").exists());
    }

    #[test]
    fn missing_directory_is_not_an_error() {
        let target = TempDir::new().unwrap();
        assert_eq!(
            remove_generator(target.path()).unwrap(),
            CleanupStatus::NotPresent
        );
    }
}
