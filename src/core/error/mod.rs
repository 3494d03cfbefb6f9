use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationMissingArgument,
    ValidationInvalidArgument,

    TemplateNotFound,
    TemplateParseFailed,
    TemplateUnsupportedSyntax,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::TemplateNotFound => "template.not_found",
            ErrorCode::TemplateParseFailed => "template.parse_failed",
            ErrorCode::TemplateUnsupportedSyntax => "template.unsupported_syntax",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateNotFoundDetails {
    pub extension_type: String,
    pub template: String,
    pub path: String,
}

/// Location of a problem inside a template source, 1-based.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSyntaxDetails {
    pub source: String,
    pub construct: String,
    pub position: SourcePosition,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        let details = to_details(MissingArgumentDetails { args });
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            details,
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in manifest",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid manifest value",
            details,
        )
    }

    pub fn template_not_found(
        extension_type: impl Into<String>,
        template: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let details = to_details(TemplateNotFoundDetails {
            extension_type: extension_type.into(),
            template: template.into(),
            path: path.into(),
        });

        Self::new(ErrorCode::TemplateNotFound, "Template not found", details)
            .with_hint("Pass --templates <DIR> to point at the generator's template directory")
    }

    pub fn template_parse_failed(source: impl Into<String>, position: SourcePosition) -> Self {
        let source = source.into();
        let message = format!(
            "Could not parse {} (line {}, column {})",
            source, position.line, position.column
        );
        let details = to_details(TemplateSyntaxDetails {
            source,
            construct: "syntax error".to_string(),
            position,
        });

        Self::new(ErrorCode::TemplateParseFailed, message, details)
    }

    pub fn template_unsupported_syntax(
        source: impl Into<String>,
        construct: impl Into<String>,
        position: SourcePosition,
    ) -> Self {
        let source = source.into();
        let construct = construct.into();
        let message = format!(
            "{} in {} cannot be converted to JavaScript (line {}, column {})",
            construct, source, position.line, position.column
        );
        let details = to_details(TemplateSyntaxDetails {
            source,
            construct,
            position,
        });

        Self::new(ErrorCode::TemplateUnsupportedSyntax, message, details)
            .with_hint("Use the TypeScript variant of this template instead")
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_not_found_carries_lookup_details() {
        let err = Error::template_not_found("CHECKOUT_ARGO_EXTENSION", "react", "/tmp/x/index.tsx");

        assert_eq!(err.code.as_str(), "template.not_found");
        assert_eq!(err.details["extensionType"], "CHECKOUT_ARGO_EXTENSION");
        assert_eq!(err.details["path"], "/tmp/x/index.tsx");
        assert_eq!(err.hints.len(), 1);
    }

    #[test]
    fn unsupported_syntax_message_names_construct_and_position() {
        let err = Error::template_unsupported_syntax(
            "index.ts",
            "enum declaration",
            SourcePosition { line: 3, column: 1 },
        );

        assert!(err.message.contains("enum declaration"));
        assert!(err.message.contains("line 3"));
        assert_eq!(err.details["position"]["column"], 1);
    }
}
