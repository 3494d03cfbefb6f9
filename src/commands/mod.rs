use std::path::PathBuf;

use clap::Args;

use argo_scaffold::paths;
use argo_scaffold::{Error, ExtensionType, Template};

pub type CmdResult<T> = argo_scaffold::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Arguments shared by commands that operate on a generated project.
#[derive(Args, Default, Debug)]
pub struct ProjectArgs {
    /// Project root (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub target: Option<String>,

    /// Keep the generator's scripts/ directory after running
    #[arg(long)]
    pub keep_scripts: bool,
}

impl ProjectArgs {
    pub fn target_dir(&self) -> argo_scaffold::Result<PathBuf> {
        paths::resolve_dir(self.target.as_deref().unwrap_or("."))
    }
}

/// Parse `--type`, prompting when omitted on an interactive terminal.
pub(crate) fn select_extension(raw: Option<&str>) -> argo_scaffold::Result<ExtensionType> {
    if let Some(raw) = raw {
        return raw.parse();
    }
    if !crate::tty::require_tty_for_interactive() {
        return Err(Error::validation_missing_argument(vec!["type".to_string()]));
    }

    let options: Vec<(ExtensionType, &str)> = ExtensionType::ALL
        .iter()
        .map(|ext| (*ext, ext.label()))
        .collect();
    crate::tty::choose("Which extension type do you want to create?", &options)
}

/// Parse `--template`, prompting when omitted on an interactive terminal.
pub(crate) fn select_template(raw: Option<&str>) -> argo_scaffold::Result<Template> {
    if let Some(raw) = raw {
        return raw.parse();
    }
    if !crate::tty::require_tty_for_interactive() {
        return Err(Error::validation_missing_argument(vec![
            "template".to_string()
        ]));
    }

    let options: Vec<(Template, &str)> = Template::ALL
        .iter()
        .map(|template| (*template, template.label()))
        .collect();
    crate::tty::choose("Which template do you want to use?", &options)
}

pub mod clean_up;
pub mod generate;
pub mod templates;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (argo_scaffold::Result<serde_json::Value>, i32) {
    match command {
        // Commands without global context
        crate::Commands::Templates(args) => dispatch!(args, templates),

        // Commands with global context
        crate::Commands::Generate(args) => dispatch!(args, global, generate),
        crate::Commands::CleanUp(args) => dispatch!(args, global, clean_up),
    }
}
