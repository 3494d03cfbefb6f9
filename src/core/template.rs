//! Template lookup and rendering of the project entry point.

use std::path::{Path, PathBuf};

use crate::catalog::{ExtensionType, Template};
use crate::defaults;
use crate::error::{Error, Result};
use crate::format::{self, PrettierOptions};
use crate::transpile::{self, Dialect};
use crate::utils::io;

/// A directory of template sets, laid out as `<root>/<set>/src/index.ts[x]`.
#[derive(Debug, Clone)]
pub struct TemplateRoot {
    path: PathBuf,
}

impl TemplateRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File read to produce `template` for `extension`.
    pub fn source_path(&self, extension: ExtensionType, template: Template) -> PathBuf {
        self.path
            .join(extension.template_set())
            .join(defaults::SOURCE_DIR)
            .join(template.file_name())
    }

    /// Auxiliary bundles copied into the project root, shared one first.
    pub fn bundle_dirs(&self, extension: ExtensionType) -> Vec<PathBuf> {
        vec![
            self.path.join(defaults::BUNDLE_DIR),
            self.path
                .join(extension.template_set())
                .join(defaults::BUNDLE_DIR),
        ]
    }

    /// `.prettierrc` of the shared bundle. The same file lands in the
    /// project root, so compiled sources match the project's own settings.
    pub fn prettier_config(&self) -> PathBuf {
        self.path
            .join(defaults::BUNDLE_DIR)
            .join(defaults::PRETTIER_CONFIG)
    }

    fn read(&self, extension: ExtensionType, template: Template) -> Result<(PathBuf, String)> {
        let path = self.source_path(extension, template);
        if !path.is_file() {
            return Err(Error::template_not_found(
                extension.as_str(),
                template.as_str(),
                path.display().to_string(),
            ));
        }

        let content = io::read_file(&path, &format!("read template {}", path.display()))?;
        if content.trim().is_empty() {
            return Err(Error::template_not_found(
                extension.as_str(),
                template.as_str(),
                path.display().to_string(),
            )
            .with_hint("The template file exists but is empty"));
        }

        Ok((path, content))
    }
}

/// Entry-point source for `template`: the template text itself for typed
/// variants, transpiled and formatted JavaScript for the untyped ones.
pub fn resolve(root: &TemplateRoot, extension: ExtensionType, template: Template) -> Result<String> {
    let (path, source) = root.read(extension, template)?;

    if !template.is_compiled() {
        return Ok(source);
    }

    let name = format!(
        "{}/{}",
        extension.template_set(),
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    );
    let options = PrettierOptions::load(&root.prettier_config())?;
    let javascript = transpile::transpile(&source, Dialect::for_jsx(template.uses_jsx()), &name)?;

    format::format(
        &javascript,
        &format!("index{}", template.output_extension()),
        &options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn root_with(set: &str, file: &str, content: &str) -> (TempDir, TemplateRoot) {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join(set).join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join(file), content).unwrap();
        let root = TemplateRoot::new(dir.path());
        (dir, root)
    }

    #[test]
    fn typed_variant_is_returned_verbatim() {
        let source = "const a: string = 'x';   \n\n\n";
        let (_dir, root) = root_with("checkout", "index.ts", source);

        let out = resolve(&root, ExtensionType::Checkout, Template::VanillaTypescript).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn compiled_variant_is_stripped_and_formatted() {
        let (_dir, root) = root_with(
            "post-purchase",
            "index.ts",
            "interface S {\n  a: 1;\n}\n\n\nconst s: S = {a: 1};   \n",
        );

        let out = resolve(&root, ExtensionType::PostPurchase, Template::Vanilla).unwrap();
        assert_eq!(out, "const s = { a: 1 };\n");
    }

    #[test]
    fn compiled_variant_follows_bundled_prettierrc() {
        let (dir, root) = root_with(
            "checkout",
            "index.ts",
            "import {run} from \"m\";\n\nconst s: string = \"x\";\nrun({s});\n",
        );
        fs::create_dir_all(dir.path().join("files")).unwrap();
        fs::write(
            dir.path().join("files/.prettierrc"),
            r#"{"singleQuote": true, "bracketSpacing": false}"#,
        )
        .unwrap();

        let out = resolve(&root, ExtensionType::Checkout, Template::Vanilla).unwrap();
        assert_eq!(out, "import {run} from 'm';\n\nconst s = 'x';\nrun({s});\n");
    }

    #[test]
    fn compiled_template_literal_keeps_its_lines() {
        let (_dir, root) = root_with(
            "checkout",
            "index.ts",
            "const note: string = `a\n\n\n}`;\nconsole.log(note);\n",
        );

        let out = resolve(&root, ExtensionType::Checkout, Template::Vanilla).unwrap();
        assert!(out.contains("`a\n\n\n}`"), "{}", out);
    }

    #[test]
    fn missing_template_fails_clearly() {
        let (_dir, root) = root_with("checkout", "index.ts", "export {};\n");

        let err = resolve(&root, ExtensionType::Checkout, Template::React).unwrap_err();
        assert_eq!(err.code.as_str(), "template.not_found");
        assert_eq!(err.details["template"], "react");
        assert!(err.details["path"].as_str().unwrap().ends_with("index.tsx"));
    }

    #[test]
    fn empty_template_is_rejected() {
        let (_dir, root) = root_with("checkout", "index.ts", "  \n");

        let err = resolve(&root, ExtensionType::Checkout, Template::Vanilla).unwrap_err();
        assert_eq!(err.code.as_str(), "template.not_found");
    }

    #[test]
    fn bundle_dirs_put_shared_bundle_first() {
        let root = TemplateRoot::new("/t");
        assert_eq!(
            root.bundle_dirs(ExtensionType::PostPurchase),
            vec![PathBuf::from("/t/files"), PathBuf::from("/t/post-purchase/files")]
        );
    }
}
