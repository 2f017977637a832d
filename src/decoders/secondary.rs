use super::date;
use super::errors::{DecodeError, Segment};
use super::tokenizer::{self, QuantityField, SecondaryFields, Trailer};
use super::{FLAG, require_flag, require_symbols, verify_check};
use crate::core::config::DecoderSettings;
use crate::record::{BarcodeRecord, BatchInfo};

/// Decodes a secondary-only barcode.
///
/// `segment` is everything after the flag: the secondary data, the link
/// character and the check character. The check character covers the flag
/// through the link character.
pub fn decode_secondary(
    flag: char,
    segment: &str,
    settings: &DecoderSettings,
) -> Result<BarcodeRecord, DecodeError> {
    require_flag(flag)?;
    require_symbols(segment, 1)?;

    if segment.len() < 3 {
        return Err(DecodeError::malformed(
            Segment::Secondary,
            format!(
                "{} characters, expected data, a link character and a check character",
                segment.len()
            ),
        ));
    }

    let check_at = segment.len() - 1;
    let link_at = check_at - 1;
    let data = &segment[..link_at];
    let batch = parse_batch(data, 1, settings)?;

    let link_character = char_at(segment, link_at);
    let found = char_at(segment, check_at);
    let mut guarded = String::with_capacity(segment.len());
    guarded.push(FLAG);
    guarded.push_str(&segment[..check_at]);
    let check_character = verify_check(&guarded, found, check_at + 1)?;

    Ok(BarcodeRecord::Secondary {
        batch,
        link_character,
        check_character,
    })
}

/// Parses quantity, expiration date and lot or serial.
///
/// `data` excludes the flag, link and check characters; `start` is its
/// index in the barcode.
pub fn parse_batch(
    data: &str,
    start: usize,
    settings: &DecoderSettings,
) -> Result<BatchInfo, DecodeError> {
    let SecondaryFields {
        quantity,
        date,
        trailer,
        identifier,
    } = tokenizer::tokenize_secondary(data, start)?;

    let quantity = quantity.map(parse_quantity).transpose()?;
    let expiration = match date {
        Some(field) => date::parse_date(field.layout, field.field, settings.base_year)?,
        None => None,
    };

    let identifier = (!identifier.is_empty()).then(|| identifier.text.to_string());
    let (lot, serial) = match trailer {
        Trailer::Lot => (identifier, None),
        Trailer::Serial => (None, identifier),
    };

    Ok(BatchInfo {
        expiration,
        quantity,
        lot,
        serial,
    })
}

fn parse_quantity(field: QuantityField<'_>) -> Result<u32, DecodeError> {
    let digits = field.digits;
    debug_assert_eq!(digits.text.len(), if field.prefix == '8' { 2 } else { 5 });
    if !digits.text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::invalid_quantity(digits.text, digits.start));
    }
    // At most five digits, so the sum cannot overflow.
    Ok(digits
        .text
        .bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0')))
}

fn char_at(segment: &str, index: usize) -> char {
    segment[index..].chars().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::errors::ErrorKind;
    use chrono::NaiveDate;

    fn decode(segment: &str) -> Result<BarcodeRecord, DecodeError> {
        decode_secondary('+', segment, &DecoderSettings::default())
    }

    #[test]
    fn test_decode_yymmdd_quantity_lot() {
        let record = decode("$$8123250630LOT99K3").unwrap();
        assert_eq!(
            record.expiration_date(),
            NaiveDate::from_ymd_opt(2025, 6, 30)
        );
        assert_eq!(record.quantity(), Some(12));
        assert_eq!(record.lot(), Some("LOT99"));
        assert_eq!(record.serial(), None);
        assert_eq!(record.link_character(), Some('K'));
        assert_eq!(record.check_character(), '3');
    }

    #[test]
    fn test_quantity_absent_is_not_zero() {
        let record = decode("$$3250630LOT99KZ").unwrap();
        assert_eq!(record.quantity(), None);

        let record = decode("$$8003250630LOT99K0").unwrap();
        assert_eq!(record.quantity(), Some(0));
    }

    #[test]
    fn test_invalid_quantity_digits() {
        let err = decode("$$81X3250630LOT99K3").unwrap_err();
        assert_eq!(err, DecodeError::invalid_quantity("1X", 4));

        let err = decode("$$8+13250630LOT99K3").unwrap_err();
        assert_eq!(err, DecodeError::invalid_quantity("+1", 4));
    }

    #[test]
    fn test_lot_with_symbols_rejected() {
        for segment in ["$$3250630LO/T 9.9KL", "$$+3250630SN.1K-", "$LOT$1K4"] {
            let err = decode(segment).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedSegment, "{:?}", segment);
        }
    }

    #[test]
    fn test_invalid_month() {
        let err = decode("$$3251330LOT99KC").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDate);
        assert_eq!(err.position(), Some(4));
    }

    #[test]
    fn test_unknown_selector() {
        let err = decode("$$X250630LOT99KC").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownDateFormat);
    }

    #[test]
    fn test_symbol_link_characters() {
        let record = decode("$$09053C001/H").unwrap();
        assert_eq!(record.link_character(), Some('/'));
        assert_eq!(record.lot(), Some("3C001"));

        let record = decode("$$09053C001 F").unwrap();
        assert_eq!(record.link_character(), Some(' '));

        let err = decode("$$09053C001//").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CheckDigitMismatch);
    }

    #[test]
    fn test_too_short() {
        for segment in ["", "K", "$K"] {
            let err = decode(segment).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedSegment, "{:?}", segment);
        }
    }

    #[test]
    fn test_check_mismatch_position() {
        let err = decode("$$8123250630LOT99K4").unwrap_err();
        assert_eq!(
            err,
            DecodeError::CheckDigitMismatch {
                expected: '3',
                found: '4',
                position: 19
            }
        );
    }

    #[test]
    fn test_parse_batch_serial_with_date() {
        let batch = parse_batch("$$+20928050001", 1, &DecoderSettings::default()).unwrap();
        assert_eq!(
            batch.expiration.unwrap().date,
            NaiveDate::from_ymd_opt(2005, 9, 28).unwrap()
        );
        assert_eq!(batch.serial.as_deref(), Some("0001"));
        assert_eq!(batch.lot, None);
        assert_eq!(batch.quantity, None);
    }

    #[test]
    fn test_parse_batch_quantity_only() {
        let batch = parse_batch("$$824", 1, &DecoderSettings::default()).unwrap();
        assert_eq!(batch.quantity, Some(24));
        assert_eq!(batch.expiration, None);
        assert_eq!(batch.lot, None);
    }
}
