use clap::Args;
use serde::Serialize;

use argo_scaffold::{ExtensionType, Template};

use super::CmdResult;

#[derive(Args)]
pub struct TemplatesArgs {
    /// Only list combinations for this extension type
    #[arg(long = "type", value_name = "TYPE")]
    pub extension_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateEntry {
    pub extension_type: ExtensionType,
    pub template: Template,
    pub label: String,
    pub source: String,
    pub output: String,
    pub compiled: bool,
}

#[derive(Debug, Serialize)]
pub struct TemplatesOutput {
    pub command: &'static str,
    pub templates: Vec<TemplateEntry>,
}

pub fn run_json(args: TemplatesArgs) -> CmdResult<TemplatesOutput> {
    let types: Vec<ExtensionType> = match args.extension_type.as_deref() {
        Some(raw) => vec![raw.parse()?],
        None => ExtensionType::ALL.to_vec(),
    };

    let templates = types
        .into_iter()
        .flat_map(|extension| {
            Template::ALL.into_iter().map(move |template| TemplateEntry {
                extension_type: extension,
                template,
                label: format!("{} / {}", extension.label(), template.label()),
                source: format!("{}/src/{}", extension.template_set(), template.file_name()),
                output: template.entry_path(),
                compiled: template.is_compiled(),
            })
        })
        .collect();

    Ok((
        TemplatesOutput {
            command: "templates",
            templates,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_combination_by_default() {
        let (output, code) = run_json(TemplatesArgs {
            extension_type: None,
        })
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(output.templates.len(), 8);
    }

    #[test]
    fn filters_by_type() {
        let (output, _) = run_json(TemplatesArgs {
            extension_type: Some("post-purchase".to_string()),
        })
        .unwrap();

        assert_eq!(output.templates.len(), 4);
        let react = output
            .templates
            .iter()
            .find(|entry| entry.template == Template::React)
            .unwrap();
        assert_eq!(react.source, "post-purchase/src/index.tsx");
        assert_eq!(react.output, "src/index.jsx");
    }
}
