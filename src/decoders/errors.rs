use serde::Serialize;
use std::fmt;

use crate::record::BarcodeKind;

/// The segment of a barcode an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The whole string, before classification
    Barcode,
    /// Labeler, product number and unit of measure
    Primary,
    /// Date, quantity, lot/serial and link character
    Secondary,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Barcode => "barcode",
            Segment::Primary => "primary segment",
            Segment::Secondary => "secondary segment",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure categories, without the diagnostic payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCharacter,
    MalformedSegment,
    InvalidUnitOfMeasure,
    CheckDigitMismatch,
    UnknownDateFormat,
    InvalidDate,
    InvalidQuantity,
    UnrecognizedFormat,
    InvalidArgumentKind,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidCharacter => "invalid_character",
            ErrorKind::MalformedSegment => "malformed_segment",
            ErrorKind::InvalidUnitOfMeasure => "invalid_unit_of_measure",
            ErrorKind::CheckDigitMismatch => "check_digit_mismatch",
            ErrorKind::UnknownDateFormat => "unknown_date_format",
            ErrorKind::InvalidDate => "invalid_date",
            ErrorKind::InvalidQuantity => "invalid_quantity",
            ErrorKind::UnrecognizedFormat => "unrecognized_format",
            ErrorKind::InvalidArgumentKind => "invalid_argument_kind",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while decoding a barcode.
///
/// Positions are character indices into the string handed to
/// [`decode`](crate::decode), including any `*` delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A character outside the HIBC character set
    InvalidCharacter { char: char, position: usize },
    /// A segment is too short, too long, or missing a required selector
    MalformedSegment {
        segment: Segment,
        reason: String,
    },
    /// The unit of measure is not a single digit
    InvalidUnitOfMeasure { found: char, position: usize },
    /// The trailing check character does not match the computed one
    CheckDigitMismatch {
        expected: char,
        found: char,
        position: usize,
    },
    /// The date format selector is not in the layout table
    UnknownDateFormat { selector: char, position: usize },
    /// The date field does not form a calendar date
    InvalidDate { field: String, position: usize },
    /// The quantity field contains non-digits
    InvalidQuantity { field: String, position: usize },
    /// The leading flag is missing or unknown
    UnrecognizedFormat {
        found: Option<char>,
        position: usize,
    },
}

impl DecodeError {
    pub fn invalid_character(c: char, position: usize) -> Self {
        DecodeError::InvalidCharacter { char: c, position }
    }

    pub fn malformed(segment: Segment, reason: impl Into<String>) -> Self {
        DecodeError::MalformedSegment {
            segment,
            reason: reason.into(),
        }
    }

    pub fn invalid_date(field: impl Into<String>, position: usize) -> Self {
        DecodeError::InvalidDate {
            field: field.into(),
            position,
        }
    }

    pub fn invalid_quantity(field: impl Into<String>, position: usize) -> Self {
        DecodeError::InvalidQuantity {
            field: field.into(),
            position,
        }
    }

    /// The failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            DecodeError::MalformedSegment { .. } => ErrorKind::MalformedSegment,
            DecodeError::InvalidUnitOfMeasure { .. } => ErrorKind::InvalidUnitOfMeasure,
            DecodeError::CheckDigitMismatch { .. } => ErrorKind::CheckDigitMismatch,
            DecodeError::UnknownDateFormat { .. } => ErrorKind::UnknownDateFormat,
            DecodeError::InvalidDate { .. } => ErrorKind::InvalidDate,
            DecodeError::InvalidQuantity { .. } => ErrorKind::InvalidQuantity,
            DecodeError::UnrecognizedFormat { .. } => ErrorKind::UnrecognizedFormat,
        }
    }

    /// Character index of the offending input, where one is known.
    pub fn position(&self) -> Option<usize> {
        match self {
            DecodeError::InvalidCharacter { position, .. }
            | DecodeError::InvalidUnitOfMeasure { position, .. }
            | DecodeError::CheckDigitMismatch { position, .. }
            | DecodeError::UnknownDateFormat { position, .. }
            | DecodeError::InvalidDate { position, .. }
            | DecodeError::InvalidQuantity { position, .. }
            | DecodeError::UnrecognizedFormat { position, .. } => Some(*position),
            DecodeError::MalformedSegment { .. } => None,
        }
    }

    /// A suggestion for the person who scanned or typed the barcode.
    pub fn hint(&self) -> &'static str {
        match self {
            DecodeError::InvalidCharacter { .. } => {
                "valid characters: 0-9 A-Z - . space $ / + %"
            }
            DecodeError::MalformedSegment { .. } => "the barcode may be truncated; rescan the label",
            DecodeError::InvalidUnitOfMeasure { .. } => {
                "the character before the check character must be a digit 0-9"
            }
            DecodeError::CheckDigitMismatch { .. } => {
                "the label was misread or mistyped; rescan the label"
            }
            DecodeError::UnknownDateFormat { .. } => "known date selectors are 0-7",
            DecodeError::InvalidDate { .. } => "the expiration date is not a calendar date",
            DecodeError::InvalidQuantity { .. } => "quantities are 2 digits after 8 or 5 digits after 9",
            DecodeError::UnrecognizedFormat { .. } => "HIBC barcodes start with '+'",
        }
    }

    /// Shifts every reported position by `offset` characters.
    pub(crate) fn offset_by(self, offset: usize) -> Self {
        match self {
            DecodeError::InvalidCharacter { char, position } => DecodeError::InvalidCharacter {
                char,
                position: position + offset,
            },
            DecodeError::InvalidUnitOfMeasure { found, position } => {
                DecodeError::InvalidUnitOfMeasure {
                    found,
                    position: position + offset,
                }
            }
            DecodeError::CheckDigitMismatch {
                expected,
                found,
                position,
            } => DecodeError::CheckDigitMismatch {
                expected,
                found,
                position: position + offset,
            },
            DecodeError::UnknownDateFormat { selector, position } => {
                DecodeError::UnknownDateFormat {
                    selector,
                    position: position + offset,
                }
            }
            DecodeError::InvalidDate { field, position } => DecodeError::InvalidDate {
                field,
                position: position + offset,
            },
            DecodeError::InvalidQuantity { field, position } => DecodeError::InvalidQuantity {
                field,
                position: position + offset,
            },
            DecodeError::UnrecognizedFormat { found, position } => {
                DecodeError::UnrecognizedFormat {
                    found,
                    position: position + offset,
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidCharacter { char: c, position } => {
                write!(f, "invalid character {:?} at position {}", c, position)
            }
            DecodeError::MalformedSegment { segment, reason } => {
                write!(f, "malformed {}: {}", segment, reason)
            }
            DecodeError::InvalidUnitOfMeasure { found, position } => write!(
                f,
                "invalid unit of measure {:?} at position {}",
                found, position
            ),
            DecodeError::CheckDigitMismatch {
                expected,
                found,
                position,
            } => write!(
                f,
                "check character mismatch at position {}: expected {:?}, found {:?}",
                position, expected, found
            ),
            DecodeError::UnknownDateFormat { selector, position } => write!(
                f,
                "unknown date format selector {:?} at position {}",
                selector, position
            ),
            DecodeError::InvalidDate { field, position } => {
                write!(f, "invalid date {:?} at position {}", field, position)
            }
            DecodeError::InvalidQuantity { field, position } => {
                write!(f, "invalid quantity {:?} at position {}", field, position)
            }
            DecodeError::UnrecognizedFormat {
                found: Some(c),
                position,
            } => write!(f, "unrecognized barcode flag {:?} at position {}", c, position),
            DecodeError::UnrecognizedFormat {
                found: None,
                position: 0,
            } => write!(f, "unrecognized barcode: no flag character"),
            DecodeError::UnrecognizedFormat { found: None, .. } => {
                write!(f, "unrecognized barcode: no data after the flag character")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Error returned when link validation is given records of the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    InvalidArgumentKind {
        /// Which argument was rejected: `"primary"` or `"secondary"`
        argument: &'static str,
        kind: BarcodeKind,
    },
}

impl LinkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinkError::InvalidArgumentKind { .. } => ErrorKind::InvalidArgumentKind,
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::InvalidArgumentKind { argument, kind } => write!(
                f,
                "{} argument cannot be a {} barcode",
                argument,
                kind.as_str()
            ),
        }
    }
}

impl std::error::Error for LinkError {}
