//! Pruning of generator-only entries from `package.json`.
//!
//! The manifest is kept as an ordered JSON object so untouched keys keep
//! their position. Only the three sections the generator edits are given
//! typed access.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::ExtensionType;
use crate::defaults;
use crate::error::{Error, Result};
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    #[serde(rename = "scripts")]
    Scripts,
    #[serde(rename = "dependencies")]
    Dependencies,
    #[serde(rename = "devDependencies")]
    DevDependencies,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::Scripts => "scripts",
            Section::Dependencies => "dependencies",
            Section::DevDependencies => "devDependencies",
        }
    }
}

/// Keys to drop, grouped by section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunePlan {
    pub removals: Vec<(Section, &'static str)>,
}

impl PrunePlan {
    /// Generator scripts and dev tooling, plus the dependency pair that
    /// belongs to the other extension type.
    pub fn for_extension(extension: ExtensionType) -> Self {
        let mut removals = Vec::new();
        removals.extend(
            defaults::GENERATOR_SCRIPTS
                .iter()
                .map(|key| (Section::Scripts, *key)),
        );
        removals.extend(
            defaults::GENERATOR_DEV_DEPENDENCIES
                .iter()
                .map(|key| (Section::DevDependencies, *key)),
        );
        removals.extend(
            extension
                .other()
                .dependencies()
                .into_iter()
                .map(|key| (Section::Dependencies, key)),
        );
        Self { removals }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// Dotted paths of the keys that were present and removed.
    pub removed: Vec<String>,
}

impl PruneReport {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    doc: Map<String, Value>,
}

impl Manifest {
    pub fn parse(raw: &str, path: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| Error::config_invalid_json(path, e))?;

        match value {
            Value::Object(doc) => Ok(Self { doc }),
            other => Err(Error::config_invalid_value(
                "package.json",
                Some(kind_of(&other).to_string()),
                "Manifest must be a JSON object",
            )),
        }
    }

    pub fn section(&self, section: Section) -> Result<Option<&Map<String, Value>>> {
        match self.doc.get(section.key()) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(not_an_object(section, other)),
        }
    }

    fn section_mut(&mut self, section: Section) -> Result<Option<&mut Map<String, Value>>> {
        match self.doc.get_mut(section.key()) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(not_an_object(section, other)),
        }
    }

    /// Remove every key in `plan`. Keys or sections that are absent are skipped.
    pub fn apply(&mut self, plan: &PrunePlan) -> Result<PruneReport> {
        let mut report = PruneReport::default();

        for (section, key) in &plan.removals {
            let Some(map) = self.section_mut(*section)? else {
                continue;
            };
            if map.shift_remove(*key).is_some() {
                report.removed.push(format!("{}.{}", section.key(), key));
            }
        }

        Ok(report)
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.doc).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize package.json".to_string()))
        })?;
        out.push('\n');
        Ok(out)
    }
}

/// Read, prune and rewrite the manifest at `path`.
pub fn prune_file(path: &Path, extension: ExtensionType) -> Result<PruneReport> {
    let raw = io::read_file(path, "read package.json")?;
    let mut manifest = Manifest::parse(&raw, &path.display().to_string())?;

    let report = manifest.apply(&PrunePlan::for_extension(extension))?;
    if !report.changed() {
        return Ok(report);
    }
    io::write_file_atomic(path, &manifest.to_pretty_string()?, "write package.json")?;

    crate::log_status!(
        "clean-up",
        "Removed {} generator entr{} from package.json",
        report.removed.len(),
        if report.removed.len() == 1 { "y" } else { "ies" }
    );
    Ok(report)
}

fn not_an_object(section: Section, value: &Value) -> Error {
    Error::config_invalid_value(
        section.key(),
        Some(kind_of(value).to_string()),
        format!("'{}' must be an object", section.key()),
    )
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PACKAGE: &str = r#"{
  "name": "my-extension",
  "version": "0.1.0",
  "scripts": {
    "build": "shopify-argo build",
    "generate": "ts-node ./scripts/generate",
    "clean-up": "ts-node ./scripts/clean-up"
  },
  "dependencies": {
    "@shopify/argo-checkout": "^0.10.0",
    "@shopify/argo-checkout-react": "^0.10.0",
    "@shopify/argo-post-purchase": "^0.10.0",
    "@shopify/argo-post-purchase-react": "^0.10.0",
    "react": "^17.0.0"
  },
  "devDependencies": {
    "@types/yargs": "^16.0.0",
    "fs-extra": "^9.0.0",
    "inquirer": "^7.3.3",
    "ts-node": "^9.1.1",
    "typescript": "^4.1.0",
    "yargs": "^16.2.0"
  }
}"#;

    fn manifest() -> Manifest {
        Manifest::parse(PACKAGE, "package.json").unwrap()
    }

    fn keys(map: Option<&Map<String, Value>>) -> Vec<String> {
        map.unwrap().keys().cloned().collect()
    }

    #[test]
    fn checkout_keeps_checkout_pair_and_drops_post_purchase() {
        let mut m = manifest();
        m.apply(&PrunePlan::for_extension(ExtensionType::Checkout)).unwrap();

        assert_eq!(
            keys(m.section(Section::Dependencies).unwrap()),
            vec!["@shopify/argo-checkout", "@shopify/argo-checkout-react", "react"]
        );
        assert_eq!(keys(m.section(Section::Scripts).unwrap()), vec!["build"]);
        assert_eq!(
            keys(m.section(Section::DevDependencies).unwrap()),
            vec!["typescript"]
        );
    }

    #[test]
    fn post_purchase_drops_checkout_pair() {
        let mut m = manifest();
        let report = m
            .apply(&PrunePlan::for_extension(ExtensionType::PostPurchase))
            .unwrap();

        let deps = keys(m.section(Section::Dependencies).unwrap());
        assert!(deps.contains(&"@shopify/argo-post-purchase".to_string()));
        assert!(deps.contains(&"@shopify/argo-post-purchase-react".to_string()));
        assert!(!deps.iter().any(|d| d.starts_with("@shopify/argo-checkout")));
        assert!(report
            .removed
            .contains(&"dependencies.@shopify/argo-checkout-react".to_string()));
        assert_eq!(report.removed.len(), 9);
    }

    #[test]
    fn pruning_twice_is_a_no_op() {
        let mut m = manifest();
        let plan = PrunePlan::for_extension(ExtensionType::Checkout);
        m.apply(&plan).unwrap();
        let first = m.to_pretty_string().unwrap();

        let second_report = m.apply(&plan).unwrap();
        assert!(!second_report.changed());
        assert_eq!(m.to_pretty_string().unwrap(), first);
    }

    #[test]
    fn missing_sections_are_skipped() {
        let mut m = Manifest::parse(r#"{"name": "bare"}"#, "package.json").unwrap();
        let report = m
            .apply(&PrunePlan::for_extension(ExtensionType::Checkout))
            .unwrap();
        assert!(report.removed.is_empty());
        assert_eq!(m.to_pretty_string().unwrap(), "{\n  \"name\": \"bare\"\n}\n");
    }

    #[test]
    fn key_order_is_preserved() {
        let mut m = manifest();
        m.apply(&PrunePlan::for_extension(ExtensionType::Checkout)).unwrap();
        let out = m.to_pretty_string().unwrap();

        let name = out.find("\"name\"").unwrap();
        let version = out.find("\"version\"").unwrap();
        let scripts = out.find("\"scripts\"").unwrap();
        let dev = out.find("\"devDependencies\"").unwrap();
        assert!(name < version && version < scripts && scripts < dev);
    }

    #[test]
    fn non_object_section_is_rejected() {
        let mut m = Manifest::parse(r#"{"scripts": ["generate"]}"#, "package.json").unwrap();
        let err = m
            .apply(&PrunePlan::for_extension(ExtensionType::Checkout))
            .unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "scripts");
    }

    #[test]
    fn invalid_json_is_reported_with_path() {
        let err = Manifest::parse("{ not json", "/p/package.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
        assert_eq!(err.details["path"], "/p/package.json");
    }

    #[test]
    fn prune_file_leaves_clean_manifest_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        let raw = "{\"name\":\"done\",\"scripts\":{\"build\":\"x\"}}";
        fs::write(&path, raw).unwrap();

        let report = prune_file(&path, ExtensionType::Checkout).unwrap();

        assert!(!report.changed());
        assert_eq!(fs::read_to_string(&path).unwrap(), raw);
    }

    #[test]
    fn prune_file_rewrites_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, PACKAGE).unwrap();

        let report = prune_file(&path, ExtensionType::Checkout).unwrap();
        assert_eq!(report.removed.len(), 9);

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("\"generate\""));
        assert!(written.contains("\"@shopify/argo-checkout-react\""));
        assert!(written.ends_with("}\n"));
    }
}
