use std::path::{Path, PathBuf};

use crate::defaults;

/// Expand `~` and make a user-supplied path absolute against the working directory.
pub fn resolve_dir(raw: &str) -> crate::Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(raw).to_string());
    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let cwd = std::env::current_dir().map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some("get current dir".to_string()))
    })?;
    Ok(cwd.join(expanded))
}

pub fn source_dir(target: &Path) -> PathBuf {
    target.join(defaults::SOURCE_DIR)
}

pub fn manifest(target: &Path) -> PathBuf {
    target.join(defaults::MANIFEST_FILE)
}

pub fn generator_dir(target: &Path) -> PathBuf {
    target.join(defaults::GENERATOR_DIR)
}

pub fn default_templates(target: &Path) -> PathBuf {
    target.join(defaults::TEMPLATES_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_kept() {
        let resolved = resolve_dir("/srv/app").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/app"));
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let resolved = resolve_dir("my-extension").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("my-extension"));
    }

    #[test]
    fn project_layout_is_rooted_at_target() {
        let target = Path::new("/work/ext");
        assert_eq!(manifest(target), PathBuf::from("/work/ext/package.json"));
        assert_eq!(generator_dir(target), PathBuf::from("/work/ext/scripts"));
        assert_eq!(
            default_templates(target),
            PathBuf::from("/work/ext/scripts/generate/templates")
        );
    }
}
