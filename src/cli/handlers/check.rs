use crate::cli::args::CheckArgs;
use std::process::ExitCode;

pub fn handle(args: CheckArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let check = hibc::checksum(&args.data)?;
    println!("{}", check);
    Ok(ExitCode::SUCCESS)
}
