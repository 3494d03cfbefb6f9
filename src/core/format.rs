//! Code formatting for generated JavaScript.
//!
//! Type erasure leaves holes where declarations used to be. Compiled entry
//! points are reprinted with dprint, configured from the `.prettierrc`
//! shipped with the templates, so they read like hand-written source.

use std::path::Path;

use dprint_plugin_typescript::configuration::{
    Configuration, ConfigurationBuilder, QuoteStyle, SemiColons, TrailingCommas,
};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    None,
    Es5,
    All,
}

/// The `.prettierrc` options that carry over to the formatter. Unknown keys
/// are ignored; absent ones take prettier's defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrettierOptions {
    pub print_width: u32,
    pub tab_width: u8,
    pub use_tabs: bool,
    pub semi: bool,
    pub single_quote: bool,
    pub bracket_spacing: bool,
    pub trailing_comma: TrailingComma,
}

impl Default for PrettierOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            tab_width: 2,
            use_tabs: false,
            semi: true,
            single_quote: false,
            bracket_spacing: true,
            trailing_comma: TrailingComma::Es5,
        }
    }
}

impl PrettierOptions {
    /// Read a JSON `.prettierrc`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let raw = io::read_file(path, "read .prettierrc")?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
    }

    fn configuration(&self) -> Configuration {
        let mut builder = ConfigurationBuilder::new();
        builder
            .line_width(self.print_width)
            .indent_width(self.tab_width)
            .use_tabs(self.use_tabs)
            .quote_style(if self.single_quote {
                QuoteStyle::PreferSingle
            } else {
                QuoteStyle::PreferDouble
            })
            .semi_colons(if self.semi {
                SemiColons::Prefer
            } else {
                SemiColons::Asi
            })
            .object_expression_space_surrounding_properties(self.bracket_spacing)
            .object_pattern_space_surrounding_properties(self.bracket_spacing)
            .import_declaration_space_surrounding_named_imports(self.bracket_spacing)
            .export_declaration_space_surrounding_named_exports(self.bracket_spacing);

        match self.trailing_comma {
            TrailingComma::None => {
                builder.trailing_commas(TrailingCommas::Never);
            }
            // es5 keeps call arguments and parameter lists bare.
            TrailingComma::Es5 => {
                builder
                    .trailing_commas(TrailingCommas::OnlyMultiLine)
                    .arguments_trailing_commas(TrailingCommas::Never)
                    .parameters_trailing_commas(TrailingCommas::Never);
            }
            TrailingComma::All => {
                builder.trailing_commas(TrailingCommas::OnlyMultiLine);
            }
        }

        builder.build()
    }
}

/// Reprint `source`. The extension of `file_name` selects the syntax
/// (`.js` or `.jsx`). String, template and JSX text contents are kept as is.
pub fn format(source: &str, file_name: &str, options: &PrettierOptions) -> Result<String> {
    let config = options.configuration();

    let formatted =
        dprint_plugin_typescript::format_text(Path::new(file_name), source, &config)
            .map_err(|e| {
                Error::internal_unexpected(format!("Failed to format {}: {}", file_name, e))
            })?;

    // `None` means the text is already formatted.
    Ok(formatted.unwrap_or_else(|| source.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn prettierrc() -> PrettierOptions {
        PrettierOptions {
            single_quote: true,
            bracket_spacing: false,
            ..PrettierOptions::default()
        }
    }

    #[test]
    fn template_literal_contents_survive() {
        let out = format("const s = `a\n\n\n}   `;\n", "index.js", &prettierrc()).unwrap();
        assert!(out.contains("`a\n\n\n}   `"), "{}", out);
    }

    #[test]
    fn string_contents_survive() {
        let out = format("const s = 'x  }';\n", "index.js", &prettierrc()).unwrap();
        assert!(out.contains("'x  }'"), "{}", out);
    }

    #[test]
    fn applies_quote_and_bracket_options() {
        let out = format(
            "import { a } from \"m\";\nconst o = { a };\nconsole.log(o);\n",
            "index.js",
            &prettierrc(),
        )
        .unwrap();

        assert!(out.contains("import {a} from 'm';"), "{}", out);
        assert!(out.contains("const o = {a};"), "{}", out);
    }

    #[test]
    fn reindents_stray_top_level_statements() {
        let out = format(" extend('x', () => {});\n", "index.js", &prettierrc()).unwrap();
        assert_eq!(out, "extend('x', () => {});\n");
    }

    #[test]
    fn collapses_blank_line_runs() {
        let out = format("a();\n\n\n\nb();\n", "index.js", &prettierrc()).unwrap();
        assert_eq!(out, "a();\n\nb();\n");
    }

    #[test]
    fn keeps_jsx() {
        let out = format(
            "render('x', () => <App   label=\"hi\" />);\n",
            "index.jsx",
            &prettierrc(),
        )
        .unwrap();
        assert!(out.contains("<App label=\"hi\" />"), "{}", out);
    }

    #[test]
    fn load_reads_prettierrc_and_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".prettierrc");
        fs::write(
            &path,
            r#"{"singleQuote": true, "bracketSpacing": false, "trailingComma": "all", "overrides": []}"#,
        )
        .unwrap();

        let options = PrettierOptions::load(&path).unwrap();

        assert!(options.single_quote);
        assert!(!options.bracket_spacing);
        assert_eq!(options.trailing_comma, TrailingComma::All);
        assert_eq!(options.print_width, 80);
    }

    #[test]
    fn load_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let options = PrettierOptions::load(&dir.path().join(".prettierrc")).unwrap();
        assert_eq!(options, PrettierOptions::default());
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".prettierrc");
        fs::write(&path, "singleQuote: true\n").unwrap();

        let err = PrettierOptions::load(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }
}
