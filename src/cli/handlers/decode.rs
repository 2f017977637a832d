use crate::cli::{
    args::DecodeArgs,
    global::GlobalArgs,
    report::{render_decode_error, should_use_color},
};
use hibc::{BarcodeRecord, DecodeError, Decoder};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

/// One line of JSON output.
#[derive(Serialize)]
struct DecodeOutput<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a BarcodeRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorOutput>,
}

#[derive(Serialize)]
struct ErrorOutput {
    kind: hibc::ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
}

impl From<&DecodeError> for ErrorOutput {
    fn from(err: &DecodeError) -> Self {
        ErrorOutput {
            kind: err.kind(),
            message: err.to_string(),
            position: err.position(),
        }
    }
}

pub fn handle(
    args: DecodeArgs,
    global: &GlobalArgs,
    decoder: &Decoder,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let inputs = if !args.barcodes.is_empty() {
        args.barcodes
    } else {
        let text = if let Some(file_path) = &args.file {
            fs::read_to_string(file_path)
                .map_err(|e| format!("Cannot read '{}': {}", file_path.display(), e))?
        } else {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        };
        read_lines(&text)
    };

    if inputs.is_empty() {
        return Err("No barcodes to decode".into());
    }

    let use_color = should_use_color(global.no_color);
    let mut failures = 0usize;

    for (index, input) in inputs.iter().enumerate() {
        let result = decoder.decode(input);
        if result.is_err() {
            failures += 1;
        }

        if args.json {
            let output = DecodeOutput {
                input: input.as_str(),
                record: result.as_ref().ok(),
                error: result.as_ref().err().map(ErrorOutput::from),
            };
            let line = if args.pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", line);
            continue;
        }

        match result {
            Ok(record) => {
                if index > 0 {
                    println!();
                }
                if inputs.len() > 1 {
                    println!("{}", input);
                }
                println!("{}", record);
            }
            Err(err) => eprintln!("{}", render_decode_error(input, &err, use_color)),
        }
    }

    if failures > 0 && inputs.len() > 1 && !global.quiet {
        eprintln!("{} of {} barcodes failed to decode", failures, inputs.len());
    }

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Splits input into barcodes, one per non-empty line.
///
/// Line endings are removed but spaces are kept, since a space is a valid
/// HIBC character.
fn read_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_lines_keeps_spaces() {
        let lines = read_lines("+A12350001K\r\n\n   \n+$$09053C001 F\n");
        assert_eq!(lines, vec!["+A12350001K", "+$$09053C001 F"]);
    }
}
