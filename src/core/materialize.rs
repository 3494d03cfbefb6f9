//! Writes the generated entry point and auxiliary files into a project.
//!
//! Failures here abort generation. Files already written stay in place.

use std::path::{Path, PathBuf};

use crate::catalog::{ExtensionType, Template};
use crate::error::Result;
use crate::paths;
use crate::template::TemplateRoot;
use crate::utils::io;

/// Write `content` to `<target>/src/index.<ext>`, creating `src/` if needed.
pub fn write_entry(target: &Path, template: Template, content: &str) -> Result<PathBuf> {
    let src_dir = paths::source_dir(target);
    io::ensure_dir(&src_dir, "create src directory")?;

    let entry = target.join(template.entry_path());
    io::write_file(&entry, content, &format!("write {}", template.entry_path()))?;

    crate::log_status!("generate", "Wrote {}", entry.display());
    Ok(entry)
}

/// Copy the shared and per-extension bundles into the project root.
///
/// Returns project-relative paths of the files written, in copy order.
pub fn copy_bundles(
    templates: &TemplateRoot,
    extension: ExtensionType,
    target: &Path,
) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for bundle in templates.bundle_dirs(extension) {
        if !bundle.is_dir() {
            continue;
        }
        let files = io::copy_dir_recursive(&bundle, target)?;
        crate::log_status!(
            "generate",
            "Copied {} file(s) from {}",
            files.len(),
            bundle.display()
        );
        copied.extend(files);
    }

    Ok(copied)
}
