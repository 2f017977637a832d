//! Expiration date layouts of the secondary segment.
//!
//! Layouts are static table entries keyed by their selector character, so a
//! new layout is one more row in [`DATE_LAYOUTS`].

use chrono::NaiveDate;

use super::errors::DecodeError;
use super::tokenizer::Field;
use crate::record::Expiry;

/// Field order of a date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `MMYY`
    MonthYear,
    /// `MMDDYY`
    MonthDayYear,
    /// `YYMMDD`
    YearMonthDay,
    /// `YYMMDDHH`
    YearMonthDayHour,
    /// `YYJJJ`, day of year
    YearJulian,
    /// `YYJJJHH`
    YearJulianHour,
    /// Selector present, no date follows
    NoDate,
}

impl DatePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePattern::MonthYear => "MMYY",
            DatePattern::MonthDayYear => "MMDDYY",
            DatePattern::YearMonthDay => "YYMMDD",
            DatePattern::YearMonthDayHour => "YYMMDDHH",
            DatePattern::YearJulian => "YYJJJ",
            DatePattern::YearJulianHour => "YYJJJHH",
            DatePattern::NoDate => "none",
        }
    }
}

/// One row of the date selector table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateLayout {
    pub selector: char,
    pub pattern: DatePattern,
    /// Number of characters in the date field
    pub width: usize,
    /// Whether the selector is the first character of the date field
    /// rather than a separate marker
    pub selector_in_field: bool,
}

/// Date selectors recognized after `$$` or `$$+` (and after any quantity).
pub static DATE_LAYOUTS: &[DateLayout] = &[
    DateLayout {
        selector: '0',
        pattern: DatePattern::MonthYear,
        width: 4,
        selector_in_field: true,
    },
    DateLayout {
        selector: '1',
        pattern: DatePattern::MonthYear,
        width: 4,
        selector_in_field: true,
    },
    DateLayout {
        selector: '2',
        pattern: DatePattern::MonthDayYear,
        width: 6,
        selector_in_field: false,
    },
    DateLayout {
        selector: '3',
        pattern: DatePattern::YearMonthDay,
        width: 6,
        selector_in_field: false,
    },
    DateLayout {
        selector: '4',
        pattern: DatePattern::YearMonthDayHour,
        width: 8,
        selector_in_field: false,
    },
    DateLayout {
        selector: '5',
        pattern: DatePattern::YearJulian,
        width: 5,
        selector_in_field: false,
    },
    DateLayout {
        selector: '6',
        pattern: DatePattern::YearJulianHour,
        width: 7,
        selector_in_field: false,
    },
    DateLayout {
        selector: '7',
        pattern: DatePattern::NoDate,
        width: 0,
        selector_in_field: false,
    },
];

/// The julian date that opens a secondary segment starting with a digit.
pub static LEADING_JULIAN: DateLayout = DateLayout {
    selector: '0',
    pattern: DatePattern::YearJulian,
    width: 5,
    selector_in_field: true,
};

pub fn layout_for(selector: char) -> Option<&'static DateLayout> {
    DATE_LAYOUTS.iter().find(|layout| layout.selector == selector)
}

/// Converts a date field to an [`Expiry`].
///
/// `base_year` is added to two-digit years. Returns `Ok(None)` for the
/// no-date layout.
pub fn parse_date(
    layout: &DateLayout,
    field: Field<'_>,
    base_year: i32,
) -> Result<Option<Expiry>, DecodeError> {
    if layout.pattern == DatePattern::NoDate {
        return Ok(None);
    }

    let text = field.text;
    if text.len() != layout.width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::invalid_date(text, field.start));
    }

    let number = |from: usize, to: usize| -> u32 {
        text[from..to]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };
    // Out-of-range years surface as `None` from the add or from chrono.
    let year = |from: usize| base_year.checked_add(number(from, from + 2) as i32);
    let ymd = |y: usize, m: usize, d: usize| {
        year(y).and_then(|y| NaiveDate::from_ymd_opt(y, number(m, m + 2), number(d, d + 2)))
    };
    let julian = || year(0).and_then(|y| NaiveDate::from_yo_opt(y, number(2, 5)));

    let (date, hour) = match layout.pattern {
        DatePattern::MonthYear => (
            year(2).and_then(|y| NaiveDate::from_ymd_opt(y, number(0, 2), 1)),
            None,
        ),
        DatePattern::MonthDayYear => (ymd(4, 0, 2), None),
        DatePattern::YearMonthDay => (ymd(0, 2, 4), None),
        DatePattern::YearMonthDayHour => (ymd(0, 2, 4), Some(number(6, 8))),
        DatePattern::YearJulian => (julian(), None),
        DatePattern::YearJulianHour => (julian(), Some(number(5, 7))),
        DatePattern::NoDate => return Ok(None),
    };

    let hour = match hour {
        Some(h) if h > 23 => return Err(DecodeError::invalid_date(text, field.start)),
        Some(h) => Some(h as u8),
        None => None,
    };

    date.map(|date| Some(Expiry { date, hour }))
        .ok_or_else(|| DecodeError::invalid_date(text, field.start))
}
