//! Splits segment data into raw fields.
//!
//! Tokenizing is purely structural: it slices fields by position and
//! selector characters and reports layout violations. Converting field
//! contents (digits, dates, quantities) happens in the decoders.

use super::date::{self, DateLayout, LEADING_JULIAN};
use super::errors::{DecodeError, Segment};

/// Labeler Identification Code length.
pub const LABELER_LEN: usize = 4;
/// Longest product number allowed.
pub const MAX_PRODUCT_LEN: usize = 18;
/// Longest lot or serial number allowed.
pub const MAX_IDENTIFIER_LEN: usize = 18;

/// A raw field and the index of its first character in the barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl<'a> Field<'a> {
    fn slice(data: &'a str, start: usize, from: usize, to: usize) -> Self {
        Field {
            text: &data[from..to],
            start: start + from,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn first(&self) -> Option<char> {
        self.text.chars().next()
    }
}

/// Fields of the primary data (labeler through unit of measure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryFields<'a> {
    pub labeler: Field<'a>,
    pub product: Field<'a>,
    pub unit_of_measure: Field<'a>,
}

/// Which identifier trails the secondary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailer {
    Lot,
    Serial,
}

/// A quantity field with its `8` (two digit) or `9` (five digit) prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityField<'a> {
    pub prefix: char,
    pub digits: Field<'a>,
}

/// A date field and the layout that reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateField<'a> {
    pub layout: &'static DateLayout,
    pub field: Field<'a>,
}

/// Fields of the secondary data (everything before the link character).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryFields<'a> {
    pub quantity: Option<QuantityField<'a>>,
    pub date: Option<DateField<'a>>,
    pub trailer: Trailer,
    pub identifier: Field<'a>,
}

/// Splits primary data into labeler, product number and unit of measure.
///
/// `data` holds the labeler through the unit of measure, without the flag
/// or a check character; `start` is its index in the barcode. The product
/// number is everything between the labeler and the final character.
pub fn tokenize_primary(data: &str, start: usize) -> Result<PrimaryFields<'_>, DecodeError> {
    let min_len = LABELER_LEN + 2;
    if data.len() < min_len {
        return Err(DecodeError::malformed(
            Segment::Primary,
            format!(
                "{} characters, expected at least {} (labeler, product, unit of measure)",
                data.len(),
                min_len
            ),
        ));
    }

    let uom_at = data.len() - 1;
    let labeler = Field::slice(data, start, 0, LABELER_LEN);
    let product = Field::slice(data, start, LABELER_LEN, uom_at);
    let unit_of_measure = Field::slice(data, start, uom_at, data.len());

    if !labeler.text.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Err(DecodeError::malformed(
            Segment::Primary,
            format!("labeler {:?} must start with a letter", labeler.text),
        ));
    }
    if !labeler.text.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DecodeError::malformed(
            Segment::Primary,
            format!("labeler {:?} must be alphanumeric", labeler.text),
        ));
    }
    if product.text.len() > MAX_PRODUCT_LEN {
        return Err(DecodeError::malformed(
            Segment::Primary,
            format!(
                "product number is {} characters, at most {} allowed",
                product.text.len(),
                MAX_PRODUCT_LEN
            ),
        ));
    }
    if !product.text.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DecodeError::malformed(
            Segment::Primary,
            format!("product number {:?} must be alphanumeric", product.text),
        ));
    }

    Ok(PrimaryFields {
        labeler,
        product,
        unit_of_measure,
    })
}

/// Splits secondary data into quantity, date and lot or serial.
///
/// `data` excludes the flag, link and check characters. The first
/// characters select the layout:
///
/// | Prefix | Layout |
/// |--------|--------|
/// | digit  | `YYJJJ` date, lot |
/// | `$$+`  | quantity?, date selector, serial |
/// | `$$`   | quantity?, date selector, lot |
/// | `$+`   | serial |
/// | `$`    | lot |
///
/// A lot or serial number, when present, is 1 to 18 alphanumeric
/// characters.
pub fn tokenize_secondary(data: &str, start: usize) -> Result<SecondaryFields<'_>, DecodeError> {
    let fields = split_secondary(data, start)?;
    check_identifier(fields.identifier, fields.trailer)?;
    Ok(fields)
}

fn split_secondary(data: &str, start: usize) -> Result<SecondaryFields<'_>, DecodeError> {
    let Some(first) = data.chars().next() else {
        return Err(DecodeError::malformed(
            Segment::Secondary,
            "no data before the check character",
        ));
    };

    if first.is_ascii_digit() {
        if data.len() < LEADING_JULIAN.width {
            return Err(DecodeError::malformed(
                Segment::Secondary,
                format!(
                    "julian date needs {} digits, found {} characters",
                    LEADING_JULIAN.width,
                    data.len()
                ),
            ));
        }
        return Ok(SecondaryFields {
            quantity: None,
            date: Some(DateField {
                layout: &LEADING_JULIAN,
                field: Field::slice(data, start, 0, LEADING_JULIAN.width),
            }),
            trailer: Trailer::Lot,
            identifier: Field::slice(data, start, LEADING_JULIAN.width, data.len()),
        });
    }

    if data.starts_with("$$+") {
        return tokenize_flagged(data, start, 3, Trailer::Serial);
    }
    if data.starts_with("$$") {
        return tokenize_flagged(data, start, 2, Trailer::Lot);
    }

    let (skip, trailer) = if data.starts_with("$+") {
        (2, Trailer::Serial)
    } else if first == '$' {
        (1, Trailer::Lot)
    } else {
        return Err(DecodeError::UnknownDateFormat {
            selector: first,
            position: start,
        });
    };

    let identifier = Field::slice(data, start, skip, data.len());
    if identifier.is_empty() {
        return Err(DecodeError::malformed(
            Segment::Secondary,
            format!("{} is missing", trailer_name(trailer)),
        ));
    }

    Ok(SecondaryFields {
        quantity: None,
        date: None,
        trailer,
        identifier,
    })
}

/// Tokenizes the `$$` and `$$+` layouts from the character after the flags.
fn tokenize_flagged(
    data: &str,
    start: usize,
    mut at: usize,
    trailer: Trailer,
) -> Result<SecondaryFields<'_>, DecodeError> {
    let quantity = match data[at..].chars().next() {
        Some(prefix @ ('8' | '9')) => {
            let width = if prefix == '8' { 2 } else { 5 };
            let end = at + 1 + width;
            if data.len() < end {
                return Err(DecodeError::malformed(
                    Segment::Secondary,
                    format!("quantity after '{}' needs {} digits", prefix, width),
                ));
            }
            let digits = Field::slice(data, start, at + 1, end);
            at = end;
            Some(QuantityField { prefix, digits })
        }
        _ => None,
    };

    let Some(selector) = data[at..].chars().next() else {
        if quantity.is_none() {
            return Err(DecodeError::malformed(
                Segment::Secondary,
                "date format selector is missing",
            ));
        }
        return Ok(SecondaryFields {
            quantity,
            date: None,
            trailer,
            identifier: Field::slice(data, start, at, at),
        });
    };

    let layout = date::layout_for(selector).ok_or(DecodeError::UnknownDateFormat {
        selector,
        position: start + at,
    })?;

    let field_at = if layout.selector_in_field { at } else { at + 1 };
    let field_end = field_at + layout.width;
    if data.len() < field_end {
        return Err(DecodeError::malformed(
            Segment::Secondary,
            format!(
                "{} date needs {} characters, found {}",
                layout.pattern.as_str(),
                layout.width,
                data.len() - field_at
            ),
        ));
    }

    Ok(SecondaryFields {
        quantity,
        date: Some(DateField {
            layout,
            field: Field::slice(data, start, field_at, field_end),
        }),
        trailer,
        identifier: Field::slice(data, start, field_end, data.len()),
    })
}

fn check_identifier(identifier: Field<'_>, trailer: Trailer) -> Result<(), DecodeError> {
    if identifier.text.len() > MAX_IDENTIFIER_LEN {
        return Err(DecodeError::malformed(
            Segment::Secondary,
            format!(
                "{} is {} characters, at most {} allowed",
                trailer_name(trailer),
                identifier.text.len(),
                MAX_IDENTIFIER_LEN
            ),
        ));
    }
    if !identifier.text.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DecodeError::malformed(
            Segment::Secondary,
            format!(
                "{} {:?} must be alphanumeric",
                trailer_name(trailer),
                identifier.text
            ),
        ));
    }
    Ok(())
}

fn trailer_name(trailer: Trailer) -> &'static str {
    match trailer {
        Trailer::Lot => "lot number",
        Trailer::Serial => "serial number",
    }
}
