//! Barcode classification and dispatch.
//!
//! Every HIBC message opens with the `+` flag. The character after it tells
//! the shapes apart: a letter starts a labeler code (primary data), a digit
//! or `$` starts secondary data. A primary body with a `/` before its check
//! character carries secondary data as well.

use crate::core::alphabet;
use crate::core::config::DecoderSettings;
use crate::decoders::errors::{DecodeError, Segment};
use crate::decoders::primary::{decode_primary, parse_identity};
use crate::decoders::secondary::{decode_secondary, parse_batch};
use crate::decoders::{FLAG, verify_check};
use crate::record::{BarcodeKind, BarcodeRecord};

/// Code 39 start/stop character emitted by many scanners.
const DELIMITER: char = '*';

/// Separates primary from secondary data in a concatenated barcode.
const SEPARATOR: char = '/';

/// Decodes HIBC barcodes with a fixed set of settings.
///
/// # Example
///
/// ```
/// use hibc::{BarcodeKind, Decoder, DecoderSettings};
///
/// let decoder = Decoder::new(DecoderSettings::default());
/// let record = decoder.decode("*+A12350001K*").unwrap();
/// assert_eq!(record.kind(), BarcodeKind::Primary);
/// assert_eq!(record.labeler_id_code(), Some("A123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    settings: DecoderSettings,
}

impl Decoder {
    pub fn new(settings: DecoderSettings) -> Self {
        Decoder { settings }
    }

    pub fn settings(&self) -> &DecoderSettings {
        &self.settings
    }

    /// Decodes one barcode string into a record.
    ///
    /// Error positions are character indices into `raw`, including any
    /// stripped delimiter.
    pub fn decode(&self, raw: &str) -> Result<BarcodeRecord, DecodeError> {
        let (barcode, offset) = if self.settings.strip_delimiters {
            strip_delimiters(raw)
        } else {
            (raw, 0)
        };

        self.decode_barcode(barcode)
            .map_err(|err| err.offset_by(offset))
    }

    fn decode_barcode(&self, barcode: &str) -> Result<BarcodeRecord, DecodeError> {
        if let Some((position, c)) = alphabet::first_invalid(barcode) {
            return Err(DecodeError::invalid_character(c, position));
        }

        let kind = classify(barcode)?;
        // Every character is now a single-byte symbol.
        let segment = &barcode[FLAG.len_utf8()..];
        match kind {
            BarcodeKind::Primary => decode_primary(FLAG, segment),
            BarcodeKind::Secondary => decode_secondary(FLAG, segment, &self.settings),
            BarcodeKind::Concatenated => self.decode_concatenated(barcode),
        }
    }

    /// Decodes `+ primary-data / secondary-data check`.
    ///
    /// The single check character covers everything before it. The link
    /// character is not present in the string; it is the check character
    /// the primary data would carry on its own.
    fn decode_concatenated(&self, barcode: &str) -> Result<BarcodeRecord, DecodeError> {
        let check_at = barcode.len() - 1;
        let slash = barcode[..check_at].find(SEPARATOR).ok_or_else(|| {
            DecodeError::malformed(Segment::Barcode, "no '/' between primary and secondary data")
        })?;

        let identity = parse_identity(&barcode[FLAG.len_utf8()..slash], 1)?;

        let secondary_data = &barcode[slash + 1..check_at];
        if secondary_data.is_empty() {
            return Err(DecodeError::malformed(
                Segment::Secondary,
                "no secondary data after '/'",
            ));
        }
        if secondary_data.contains(SEPARATOR) {
            return Err(DecodeError::malformed(
                Segment::Barcode,
                "more than one '/' between primary and secondary data",
            ));
        }
        let batch = parse_batch(secondary_data, slash + 1, &self.settings)?;

        let found = barcode[check_at..].chars().next().unwrap_or_default();
        let check_character = verify_check(&barcode[..check_at], found, check_at)?;

        let link_character = alphabet::checksum(&barcode[..slash])?;

        let mut secondary = String::with_capacity(secondary_data.len() + 2);
        secondary.push(FLAG);
        secondary.push_str(secondary_data);
        secondary.push(link_character);
        let secondary_check_character = alphabet::checksum(&secondary)?;

        Ok(BarcodeRecord::Concatenated {
            identity,
            batch,
            link_character,
            secondary_check_character,
            check_character,
        })
    }
}

/// Decodes one barcode string with the default settings.
///
/// # Example
///
/// ```
/// use hibc::decode;
///
/// let record = decode("+$$8123250630LOT99K3").unwrap();
/// assert_eq!(record.quantity(), Some(12));
/// assert_eq!(record.lot(), Some("LOT99"));
/// ```
pub fn decode(raw: &str) -> Result<BarcodeRecord, DecodeError> {
    Decoder::default().decode(raw)
}

/// Determines the message shape from the flag and the character after it.
///
/// Only the leading characters and the presence of a `/` separator are
/// inspected; the fields themselves are not validated.
pub fn classify(barcode: &str) -> Result<BarcodeKind, DecodeError> {
    let mut chars = barcode.chars();
    match chars.next() {
        Some(FLAG) => {}
        found => return Err(DecodeError::UnrecognizedFormat { found, position: 0 }),
    }

    let body = chars.as_str();
    match body.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let mut guarded = body.chars();
            guarded.next_back();
            if guarded.as_str().contains(SEPARATOR) {
                Ok(BarcodeKind::Concatenated)
            } else {
                Ok(BarcodeKind::Primary)
            }
        }
        Some(c) if c.is_ascii_digit() || c == '$' => Ok(BarcodeKind::Secondary),
        found => Err(DecodeError::UnrecognizedFormat {
            found,
            position: FLAG.len_utf8(),
        }),
    }
}

/// Removes one leading and one trailing delimiter.
///
/// Returns the remaining text and how many characters were removed from
/// the front.
fn strip_delimiters(raw: &str) -> (&str, usize) {
    let (text, offset) = match raw.strip_prefix(DELIMITER) {
        Some(rest) => (rest, 1),
        None => (raw, 0),
    };
    (text.strip_suffix(DELIMITER).unwrap_or(text), offset)
}
