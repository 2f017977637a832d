mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err((e, use_color)) => {
            eprintln!("{}", cli::render_message(&e.to_string(), use_color));
            ExitCode::FAILURE
        }
    }
}
