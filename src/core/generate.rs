//! The end-to-end generation pass.
//!
//! Order: resolve template, write entry, copy bundles, prune manifest,
//! remove generator. The first three steps abort on failure. Manifest and
//! cleanup failures become warnings so the project is still usable.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{ExtensionType, Template};
use crate::cleanup::{self, CleanupStatus};
use crate::error::Result;
use crate::manifest;
use crate::materialize;
use crate::paths;
use crate::template::{resolve, TemplateRoot};

/// Shown when `package.json` could not be rewritten.
pub const MANIFEST_MANUAL_FIX: &str =
    "Could not update package.json. You can manually update it by deleting the scripts.generate command.";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub target: PathBuf,
    pub templates: TemplateRoot,
    pub extension: ExtensionType,
    pub template: Template,
    /// Leave `<target>/scripts` in place.
    pub keep_scripts: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ManifestOutcome {
    Pruned { removed: Vec<String> },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub extension_type: ExtensionType,
    pub template: Template,
    /// Template root the entry was produced from.
    pub templates: String,
    pub entry: String,
    pub compiled: bool,
    pub copied_files: Vec<String>,
    pub manifest: ManifestOutcome,
    pub cleanup: CleanupStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CleanUpOutput {
    pub extension_type: ExtensionType,
    pub removed: Vec<String>,
    pub cleanup: CleanupStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub fn run(options: &GenerateOptions) -> Result<GenerateOutput> {
    let GenerateOptions {
        target,
        templates,
        extension,
        template,
        keep_scripts,
    } = options;

    crate::log_status!(
        "generate",
        "Generating {} ({}) in {}",
        extension.label(),
        template.label(),
        target.display()
    );

    let source = resolve(templates, *extension, *template)?;
    materialize::write_entry(target, *template, &source)?;
    let copied = materialize::copy_bundles(templates, *extension, target)?;

    let mut warnings = Vec::new();

    let manifest = match manifest::prune_file(&paths::manifest(target), *extension) {
        Ok(report) => ManifestOutcome::Pruned {
            removed: report.removed,
        },
        Err(err) => {
            crate::log_status!("clean-up", "{} ({})", MANIFEST_MANUAL_FIX, err.message);
            warnings.push(format!("{} ({})", MANIFEST_MANUAL_FIX, describe(&err)));
            ManifestOutcome::Failed {
                error: describe(&err),
            }
        }
    };

    let cleanup = finish_cleanup(target, *keep_scripts, &mut warnings);

    let entry = template.entry_path();
    crate::log_status!("generate", "your extension is ready to go!");
    crate::log_status!(
        "generate",
        "start by opening {} in your editor of choice",
        entry
    );

    Ok(GenerateOutput {
        extension_type: *extension,
        template: *template,
        templates: templates.path().display().to_string(),
        entry: target.join(&entry).display().to_string(),
        compiled: template.is_compiled(),
        copied_files: copied
            .iter()
            .map(|path| path.display().to_string())
            .collect(),
        manifest,
        cleanup,
        warnings,
        next_steps: vec![format!(
            "Start by opening {} in your editor of choice",
            entry
        )],
    })
}

/// Prune the manifest and remove the generator without generating sources.
///
/// Unlike `run`, a manifest failure is returned as an error since it is the
/// point of the command.
pub fn clean_up(
    target: &Path,
    extension: ExtensionType,
    keep_scripts: bool,
) -> Result<CleanUpOutput> {
    let report = manifest::prune_file(&paths::manifest(target), extension)
        .map_err(|err| err.with_hint(MANIFEST_MANUAL_FIX))?;

    let mut warnings = Vec::new();
    let cleanup = finish_cleanup(target, keep_scripts, &mut warnings);

    Ok(CleanUpOutput {
        extension_type: extension,
        removed: report.removed,
        cleanup,
        warnings,
    })
}

fn finish_cleanup(
    target: &Path,
    keep_scripts: bool,
    warnings: &mut Vec<String>,
) -> CleanupStatus {
    if keep_scripts {
        return CleanupStatus::Skipped;
    }

    match cleanup::remove_generator(target) {
        Ok(status) => status,
        Err(err) => {
            let message = format!(
                "Could not remove {}: {}",
                paths::generator_dir(target).display(),
                describe(&err)
            );
            crate::log_status!("clean-up", "{}", message);
            warnings.push(message);
            CleanupStatus::Failed
        }
    }
}

/// Error message plus the underlying cause carried in its details.
fn describe(err: &crate::Error) -> String {
    match err.details.get("error").and_then(|e| e.as_str()) {
        Some(cause) => format!("{}: {}", err.message, cause),
        None => err.message.clone(),
    }
}
