//! Fixed lookup tables for extension types and template variants.
//!
//! Both enums are closed: every (extension type, template) pair maps to
//! exactly one template file and one output extension.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Which checkout integration point the generated project targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExtensionType {
    #[serde(rename = "CHECKOUT_ARGO_EXTENSION")]
    Checkout,
    #[serde(rename = "CHECKOUT_POST_PURCHASE")]
    PostPurchase,
}

impl ExtensionType {
    pub const ALL: [ExtensionType; 2] = [ExtensionType::Checkout, ExtensionType::PostPurchase];

    /// Identifier used by the CLI and the project tooling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionType::Checkout => "CHECKOUT_ARGO_EXTENSION",
            ExtensionType::PostPurchase => "CHECKOUT_POST_PURCHASE",
        }
    }

    /// Directory under the template root holding this type's sources.
    pub fn template_set(&self) -> &'static str {
        match self {
            ExtensionType::Checkout => "checkout",
            ExtensionType::PostPurchase => "post-purchase",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExtensionType::Checkout => "Checkout extension",
            ExtensionType::PostPurchase => "Post-purchase extension",
        }
    }

    /// Runtime packages only needed by projects of this type.
    pub fn dependencies(&self) -> [&'static str; 2] {
        match self {
            ExtensionType::Checkout => ["@shopify/argo-checkout", "@shopify/argo-checkout-react"],
            ExtensionType::PostPurchase => [
                "@shopify/argo-post-purchase",
                "@shopify/argo-post-purchase-react",
            ],
        }
    }

    /// The type whose dependencies get pruned from a project of this type.
    pub fn other(&self) -> ExtensionType {
        match self {
            ExtensionType::Checkout => ExtensionType::PostPurchase,
            ExtensionType::PostPurchase => ExtensionType::Checkout,
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "checkout_argo_extension" | "checkout" => Ok(ExtensionType::Checkout),
            "checkout_post_purchase" | "post-purchase" | "post_purchase" => {
                Ok(ExtensionType::PostPurchase)
            }
            _ => Err(Error::validation_invalid_argument(
                "type",
                format!("Unknown extension type '{}'", s),
                Some(s.to_string()),
                Some(
                    ExtensionType::ALL
                        .iter()
                        .map(|t| t.as_str().to_string())
                        .collect(),
                ),
            )),
        }
    }
}

/// Language/framework flavor of the generated entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    Vanilla,
    React,
    VanillaTypescript,
    ReactTypescript,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Vanilla,
        Template::React,
        Template::VanillaTypescript,
        Template::ReactTypescript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Vanilla => "vanilla",
            Template::React => "react",
            Template::VanillaTypescript => "vanilla-typescript",
            Template::ReactTypescript => "react-typescript",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Template::Vanilla => "Vanilla JavaScript",
            Template::React => "React",
            Template::VanillaTypescript => "Vanilla TypeScript",
            Template::ReactTypescript => "React TypeScript",
        }
    }

    /// Extension of the generated `src/index` file, including the dot.
    pub fn output_extension(&self) -> &'static str {
        match self {
            Template::Vanilla => ".js",
            Template::React => ".jsx",
            Template::VanillaTypescript => ".ts",
            Template::ReactTypescript => ".tsx",
        }
    }

    /// Untyped variants are produced by transpiling their typed counterpart.
    pub fn is_compiled(&self) -> bool {
        matches!(self, Template::Vanilla | Template::React)
    }

    /// The variant whose template file is read to produce this one.
    pub fn source_template(&self) -> Template {
        match self {
            Template::Vanilla | Template::VanillaTypescript => Template::VanillaTypescript,
            Template::React | Template::ReactTypescript => Template::ReactTypescript,
        }
    }

    /// Template file name inside `<root>/<set>/src/`.
    pub fn file_name(&self) -> &'static str {
        match self.source_template() {
            Template::ReactTypescript => "index.tsx",
            _ => "index.ts",
        }
    }

    pub fn uses_jsx(&self) -> bool {
        matches!(self, Template::React | Template::ReactTypescript)
    }

    /// Path of the generated entry point relative to the project root.
    pub fn entry_path(&self) -> String {
        format!("src/index{}", self.output_extension())
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "vanilla" | "javascript" | "js" => Ok(Template::Vanilla),
            "react" => Ok(Template::React),
            "vanilla-typescript" | "vanilla-ts" | "typescript" | "ts" => {
                Ok(Template::VanillaTypescript)
            }
            "react-typescript" | "react-ts" => Ok(Template::ReactTypescript),
            _ => Err(Error::validation_invalid_argument(
                "template",
                format!("Unknown template '{}'", s),
                Some(s.to_string()),
                Some(Template::ALL.iter().map(|t| t.as_str().to_string()).collect()),
            )),
        }
    }
}
