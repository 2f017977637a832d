mod args;
mod config;
mod global;
mod handlers;
mod report;

use clap::{Parser, Subcommand};
use hibc::Decoder;
use std::process::ExitCode;

use args::{CheckArgs, ConfigArgs, DecodeArgs, LinkArgs};
use global::GlobalArgs;

pub use report::render_message;

#[derive(Parser)]
#[command(name = "hibc")]
#[command(version)]
#[command(about = "Decode and validate Health Industry Bar Code (HIBC) labels", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode barcodes into their fields
    Decode(DecodeArgs),
    /// Check that a primary and a secondary label belong together
    Link(LinkArgs),
    /// Compute the modulo-43 check character for some text
    Check(CheckArgs),
    /// Show the effective decoder settings
    Config(ConfigArgs),
}

/// Parses arguments and runs the requested command.
///
/// Returns the failure and whether color was enabled, so the caller can
/// render it.
pub fn run() -> Result<ExitCode, (Box<dyn std::error::Error>, bool)> {
    let cli = Cli::parse();
    let use_color = report::should_use_color(cli.global.no_color);

    execute(cli).map_err(|e| (e, use_color))
}

fn execute(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = config::load_settings(&cli.global)?;
    let decoder = Decoder::new(settings);

    match cli.command {
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &decoder),
        Commands::Link(args) => handlers::link::handle(args, &cli.global, &decoder),
        Commands::Check(args) => handlers::check::handle(args),
        Commands::Config(args) => handlers::config::handle(args, &cli.global, &settings),
    }
}
