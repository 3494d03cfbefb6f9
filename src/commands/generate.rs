use clap::Args;

use argo_scaffold::generate::{self, GenerateOptions, GenerateOutput};
use argo_scaffold::paths;
use argo_scaffold::template::TemplateRoot;

use super::{select_extension, select_template, CmdResult, ProjectArgs};

#[derive(Args)]
pub struct GenerateArgs {
    /// Extension type: CHECKOUT_ARGO_EXTENSION or CHECKOUT_POST_PURCHASE
    #[arg(long = "type", value_name = "TYPE")]
    pub extension_type: Option<String>,

    /// Template: vanilla, react, vanilla-typescript, react-typescript
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Template root (default: <target>/scripts/generate/templates)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: GenerateArgs, _global: &super::GlobalArgs) -> CmdResult<GenerateOutput> {
    let target = args.project.target_dir()?;
    let templates = match args.templates.as_deref() {
        Some(dir) => paths::resolve_dir(dir)?,
        None => paths::default_templates(&target),
    };

    let extension = select_extension(args.extension_type.as_deref())?;
    let template = select_template(args.template.as_deref())?;

    let output = generate::run(&GenerateOptions {
        target,
        templates: TemplateRoot::new(templates),
        extension,
        template,
        keep_scripts: args.project.keep_scripts,
    })?;

    Ok((output, 0))
}
