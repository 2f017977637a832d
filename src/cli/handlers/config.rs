use crate::cli::{args::ConfigArgs, global::GlobalArgs};
use hibc::DecoderSettings;
use std::process::ExitCode;

pub fn handle(
    args: ConfigArgs,
    global: &GlobalArgs,
    settings: &DecoderSettings,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(settings)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Strip delimiters: {}", if settings.strip_delimiters { "yes" } else { "no" });
    println!("Base year: {}", settings.base_year);

    if !global.quiet {
        match &global.config {
            Some(path) => println!("\nSettings file: {}", path),
            None => println!("\nUse --config PATH to apply a settings file"),
        }
    }

    Ok(ExitCode::SUCCESS)
}
