use crate::decoders::errors::DecodeError;

/// Number of symbols in the HIBC character set.
pub const BASE: usize = 43;

/// The HIBC character set in value order (the Code 39 alphanumeric set).
///
/// Each symbol's position is its value in the modulo-43 check calculation.
pub const SYMBOLS: [char; BASE] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', //
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', //
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', //
    '-', '.', ' ', '$', '/', '+', '%',
];

const NOT_IN_SET: u8 = u8::MAX;

/// ASCII lookup table mapping a byte to its symbol value, or `NOT_IN_SET`.
static VALUES: [u8; 128] = build_value_table();

const fn build_value_table() -> [u8; 128] {
    let mut table = [NOT_IN_SET; 128];
    let mut i = 0;
    while i < BASE {
        table[SYMBOLS[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the value (0-42) of `c`, or `None` if it is not an HIBC symbol.
pub fn value_of(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match VALUES[c as usize] {
        NOT_IN_SET => None,
        value => Some(value),
    }
}

/// Returns the symbol with the given value, or `None` if `value >= 43`.
pub fn symbol_at(value: usize) -> Option<char> {
    SYMBOLS.get(value).copied()
}

/// Whether `c` belongs to the HIBC character set.
pub fn contains(c: char) -> bool {
    value_of(c).is_some()
}

/// Finds the first character of `input` outside the character set.
///
/// Returns the character and its index counted in characters.
pub fn first_invalid(input: &str) -> Option<(usize, char)> {
    input.chars().enumerate().find(|&(_, c)| !contains(c))
}

/// Computes the modulo-43 check character over `data`.
///
/// Every character is validated before anything is summed, so an input with
/// a symbol outside the set fails with [`DecodeError::InvalidCharacter`]
/// (position counted from the start of `data`) instead of producing a
/// check character.
///
/// # Example
///
/// ```
/// use hibc::checksum;
///
/// assert_eq!(checksum("+A99912345/$$52001510X3").unwrap(), '3');
/// ```
pub fn checksum(data: &str) -> Result<char, DecodeError> {
    if let Some((position, c)) = first_invalid(data) {
        return Err(DecodeError::invalid_character(c, position));
    }

    let sum: usize = data
        .chars()
        .filter_map(value_of)
        .map(usize::from)
        .sum();

    Ok(SYMBOLS[sum % BASE])
}
