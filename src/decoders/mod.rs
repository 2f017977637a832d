//! Segment decoders for the HIBC grammar.
//!
//! - `tokenizer` slices segments into raw fields
//! - `date` holds the date layout table
//! - `primary` and `secondary` convert fields into record data and verify
//!   check characters

pub mod date;
pub mod errors;
pub mod primary;
pub mod secondary;
pub mod tokenizer;

pub use errors::{DecodeError, ErrorKind, LinkError, Segment};
pub use primary::decode_primary;
pub use secondary::decode_secondary;

use crate::core::alphabet;

/// The flag character that opens every HIBC message.
pub const FLAG: char = '+';

pub(crate) fn require_flag(flag: char) -> Result<(), DecodeError> {
    if flag == FLAG {
        Ok(())
    } else {
        Err(DecodeError::UnrecognizedFormat {
            found: Some(flag),
            position: 0,
        })
    }
}

/// Fails on the first character of `segment` outside the character set.
///
/// `start` is the index of `segment` in the barcode. Every later slice of
/// a checked segment falls on a character boundary.
pub(crate) fn require_symbols(segment: &str, start: usize) -> Result<(), DecodeError> {
    match alphabet::first_invalid(segment) {
        Some((position, c)) => Err(DecodeError::invalid_character(c, start + position)),
        None => Ok(()),
    }
}

/// Compares `found` against the check character of `guarded`.
///
/// `position` is where `found` sits in the barcode.
pub(crate) fn verify_check(guarded: &str, found: char, position: usize) -> Result<char, DecodeError> {
    let expected = alphabet::checksum(guarded)?;
    if expected == found {
        Ok(found)
    } else {
        Err(DecodeError::CheckDigitMismatch {
            expected,
            found,
            position,
        })
    }
}
