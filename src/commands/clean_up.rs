use clap::Args;

use argo_scaffold::generate::{self, CleanUpOutput};

use super::{select_extension, CmdResult, ProjectArgs};

#[derive(Args)]
pub struct CleanUpArgs {
    /// Extension type whose dependencies are kept
    #[arg(long = "type", value_name = "TYPE")]
    pub extension_type: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: CleanUpArgs, _global: &super::GlobalArgs) -> CmdResult<CleanUpOutput> {
    let target = args.project.target_dir()?;
    let extension = select_extension(args.extension_type.as_deref())?;

    let output = generate::clean_up(&target, extension, args.project.keep_scripts)?;
    Ok((output, 0))
}
