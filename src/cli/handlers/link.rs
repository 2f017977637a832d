use crate::cli::{
    args::LinkArgs,
    global::GlobalArgs,
    report::{render_decode_error, should_use_color},
};
use hibc::{BarcodeRecord, Decoder, links_match};
use std::process::ExitCode;

/// Exit status when either barcode fails to decode.
const DECODE_FAILURE: u8 = 2;

pub fn handle(
    args: LinkArgs,
    global: &GlobalArgs,
    decoder: &Decoder,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let use_color = should_use_color(global.no_color);

    let mut records = Vec::with_capacity(2);
    for input in [&args.primary, &args.secondary] {
        match decoder.decode(input) {
            Ok(record) => records.push(record),
            Err(err) => {
                eprintln!("{}", render_decode_error(input, &err, use_color));
                return Ok(ExitCode::from(DECODE_FAILURE));
            }
        }
    }
    let (primary, secondary) = (&records[0], &records[1]);

    if links_match(primary, secondary)? {
        println!("match");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("mismatch");
        if !global.quiet {
            eprintln!(
                "primary expects link {:?}, secondary carries {:?}",
                primary_key(primary),
                secondary.link_character().unwrap_or_default()
            );
        }
        Ok(ExitCode::FAILURE)
    }
}

/// The link character a primary-side record expects.
fn primary_key(record: &BarcodeRecord) -> char {
    match record {
        BarcodeRecord::Concatenated { link_character, .. } => *link_character,
        other => other.check_character(),
    }
}
