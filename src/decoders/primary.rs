use super::errors::{DecodeError, Segment};
use super::tokenizer::{self, PrimaryFields};
use super::{FLAG, require_flag, require_symbols, verify_check};
use crate::record::{BarcodeRecord, ProductIdentity};

/// Decodes a primary-only barcode.
///
/// `segment` is everything after the flag: labeler, product number, unit
/// of measure and check character. The check character covers the flag
/// through the unit of measure.
pub fn decode_primary(flag: char, segment: &str) -> Result<BarcodeRecord, DecodeError> {
    require_flag(flag)?;
    require_symbols(segment, 1)?;

    let Some(check_at) = segment.len().checked_sub(1) else {
        return Err(DecodeError::malformed(Segment::Primary, "empty primary segment"));
    };
    let data = &segment[..check_at];
    let identity = parse_identity(data, 1)?;

    let found = segment[check_at..].chars().next().unwrap_or_default();
    let mut guarded = String::with_capacity(segment.len());
    guarded.push(FLAG);
    guarded.push_str(data);
    let check_character = verify_check(&guarded, found, check_at + 1)?;

    Ok(BarcodeRecord::Primary {
        identity,
        check_character,
    })
}

/// Parses labeler, product number and unit of measure.
///
/// `data` has no flag and no check character; `start` is its index in the
/// barcode.
pub fn parse_identity(data: &str, start: usize) -> Result<ProductIdentity, DecodeError> {
    let PrimaryFields {
        labeler,
        product,
        unit_of_measure,
    } = tokenizer::tokenize_primary(data, start)?;

    let uom = unit_of_measure.first().unwrap_or_default();
    let unit_of_measure = uom
        .to_digit(10)
        .ok_or(DecodeError::InvalidUnitOfMeasure {
            found: uom,
            position: unit_of_measure.start,
        })? as u8;

    Ok(ProductIdentity {
        labeler_id_code: labeler.text.to_string(),
        product_number: product.text.to_string(),
        unit_of_measure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::errors::ErrorKind;

    #[test]
    fn test_decode_primary_fields() {
        let record = decode_primary('+', "A12350001K").unwrap();
        assert_eq!(record.labeler_id_code(), Some("A123"));
        assert_eq!(record.product_number(), Some("5000"));
        assert_eq!(record.unit_of_measure(), Some(1));
        assert_eq!(record.check_character(), 'K');
    }

    #[test]
    fn test_check_covers_flag() {
        // Without the flag the sum would be 41 lower.
        let err = decode_primary('+', "A12350001%").unwrap_err();
        assert_eq!(
            err,
            DecodeError::CheckDigitMismatch {
                expected: 'K',
                found: '%',
                position: 10
            }
        );
    }

    #[test]
    fn test_space_and_slash_check_characters() {
        let record = decode_primary('+', "A123XYZ17 ").unwrap();
        assert_eq!(record.check_character(), ' ');
        assert_eq!(record.product_number(), Some("XYZ1"));
        assert_eq!(record.unit_of_measure(), Some(7));

        let record = decode_primary('+', "A123XYZ19/").unwrap();
        assert_eq!(record.check_character(), '/');
    }

    #[test]
    fn test_unit_of_measure_must_be_digit() {
        let err = decode_primary('+', "A1235000XK").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidUnitOfMeasure {
                found: 'X',
                position: 9
            }
        );
    }

    #[test]
    fn test_lowercase_is_invalid_character() {
        let err = decode_primary('+', "a12350001K").unwrap_err();
        assert_eq!(err, DecodeError::invalid_character('a', 1));
    }

    #[test]
    fn test_wrong_flag() {
        let err = decode_primary('$', "A12350001K").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedFormat);
    }

    #[test]
    fn test_short_segments() {
        for segment in ["", "A", "A123", "A1231K"] {
            let err = decode_primary('+', segment).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedSegment, "{:?}", segment);
        }
    }
}
