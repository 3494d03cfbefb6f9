use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{clean_up, generate, templates};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "argo-scaffold")]
#[command(version = VERSION)]
#[command(about = "Scaffold checkout and post-purchase extension projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the extension entry point from a template
    Generate(generate::GenerateArgs),
    /// Prune package.json and remove the generator without generating sources
    CleanUp(clean_up::CleanUpArgs),
    /// List available extension type and template combinations
    #[command(visible_alias = "list")]
    Templates(templates::TemplatesArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
