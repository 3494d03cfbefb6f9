//! Built-in names and lists the generator relies on.

/// Directory (relative to the project root) holding the generator itself.
pub const GENERATOR_DIR: &str = "scripts";

/// Template root relative to the project root when `--templates` is not given.
pub const TEMPLATES_DIR: &str = "scripts/generate/templates";

/// Shared auxiliary bundle directory name inside the template root and
/// inside each template set.
pub const BUNDLE_DIR: &str = "files";

pub const SOURCE_DIR: &str = "src";

/// Formatter options, looked up in the shared bundle.
pub const PRETTIER_CONFIG: &str = ".prettierrc";

pub const MANIFEST_FILE: &str = "package.json";

/// `package.json` scripts that only drive the generator.
pub const GENERATOR_SCRIPTS: &[&str] = &["generate", "clean-up"];

/// Development dependencies only the generator needs.
pub const GENERATOR_DEV_DEPENDENCIES: &[&str] =
    &["@types/yargs", "fs-extra", "inquirer", "ts-node", "yargs"];
