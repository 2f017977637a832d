//! Randomized checks of the decoder's universal properties.
//!
//! Uses a fixed seed so failures reproduce.

use hibc::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const ROUNDS: usize = 2000;
const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const OUTSIDE_SET: &[char] = &['a', 'z', '!', '#', '_', '\t', '\n', 'é', '€', '~', '&'];

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x4849_4243)
}

fn pick(rng: &mut StdRng, set: &[u8]) -> char {
    char::from(*set.choose(rng).unwrap())
}

fn run(rng: &mut StdRng, set: &[u8], len: usize) -> String {
    (0..len).map(|_| pick(rng, set)).collect()
}

/// Builds `+ LIC PCN UOM` and returns it with its fields.
fn random_primary_data(rng: &mut StdRng) -> (String, String, String, u8) {
    let mut labeler = String::new();
    labeler.push(pick(rng, LETTERS));
    labeler.push_str(&run(rng, ALPHANUMERIC, 3));
    let product_len = rng.random_range(1..=18);
    let product = run(rng, ALPHANUMERIC, product_len);
    let uom = rng.random_range(0..=9u8);
    let data = format!("+{}{}{}", labeler, product, uom);
    (data, labeler, product, uom)
}

fn with_check(data: &str) -> String {
    format!("{}{}", data, checksum(data).unwrap())
}

#[test]
fn test_valid_primaries_decode_and_recheck() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let (data, labeler, product, uom) = random_primary_data(&mut rng);
        let barcode = with_check(&data);

        let record = decode(&barcode).unwrap_or_else(|e| panic!("{}: {}", barcode, e));
        assert_eq!(record.kind(), BarcodeKind::Primary);
        assert_eq!(record.labeler_id_code(), Some(labeler.as_str()));
        assert_eq!(record.product_number(), Some(product.as_str()));
        assert_eq!(record.unit_of_measure(), Some(uom));

        let rebuilt = format!("+{}{}{}", labeler, product, uom);
        assert_eq!(checksum(&rebuilt).unwrap(), record.check_character());
    }
}

#[test]
fn test_altered_check_character_fails() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let (data, _, _, _) = random_primary_data(&mut rng);
        let expected = checksum(&data).unwrap();
        let altered = loop {
            let c = *hibc::alphabet::SYMBOLS.choose(&mut rng).unwrap();
            if c != expected {
                break c;
            }
        };
        let barcode = format!("{}{}", data, altered);

        let err = decode(&barcode).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CheckDigitMismatch {
                expected,
                found: altered,
                position: data.len()
            },
            "{}",
            barcode
        );
    }
}

/// Date, quantity and lot of a generated `$$` secondary body.
struct Batch {
    body: String,
    date: (i32, u32, u32),
    quantity: Option<u32>,
    lot: String,
}

/// Builds `$$ [8QQ] 3YYMMDD LOT`, the secondary data before any link or
/// check character.
fn random_batch(rng: &mut StdRng) -> Batch {
    let date = (
        rng.random_range(0..100),
        rng.random_range(1..=12),
        rng.random_range(1..=28),
    );
    let quantity: Option<u32> = if rng.random_bool(0.5) {
        Some(rng.random_range(0..100))
    } else {
        None
    };
    let lot_len = rng.random_range(0..=10);
    let lot = run(rng, ALPHANUMERIC, lot_len);

    let quantity_field = quantity.map(|q| format!("8{:02}", q)).unwrap_or_default();
    let body = format!(
        "$${}3{:02}{:02}{:02}{}",
        quantity_field, date.0, date.1, date.2, lot
    );
    Batch {
        body,
        date,
        quantity,
        lot,
    }
}

/// One valid label of each kind.
fn random_labels(rng: &mut StdRng) -> [String; 3] {
    let (primary, _, _, _) = random_primary_data(rng);
    let batch = random_batch(rng);
    let link = pick(rng, ALPHANUMERIC);
    [
        with_check(&primary),
        with_check(&format!("+{}{}", batch.body, link)),
        with_check(&format!("{}/{}", primary, batch.body)),
    ]
}

#[test]
fn test_outside_characters_always_invalid_character() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        for label in random_labels(&mut rng) {
            assert!(decode(&label).is_ok(), "{}", label);

            let mut chars: Vec<char> = label.chars().collect();
            let position = rng.random_range(0..=chars.len());
            let bad = *OUTSIDE_SET.choose(&mut rng).unwrap();
            chars.insert(position, bad);
            let barcode: String = chars.into_iter().collect();

            let err = decode(&barcode).unwrap_err();
            assert_eq!(
                err,
                DecodeError::InvalidCharacter { char: bad, position },
                "{:?}",
                barcode
            );
        }
    }
}

#[test]
fn test_outside_characters_in_link_and_check_positions() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        for label in random_labels(&mut rng) {
            let len = label.chars().count();
            for position in [len - 2, len - 1] {
                let bad = *OUTSIDE_SET.choose(&mut rng).unwrap();
                let barcode: String = label
                    .chars()
                    .enumerate()
                    .map(|(i, c)| if i == position { bad } else { c })
                    .collect();

                let err = decode(&barcode).unwrap_err();
                assert_eq!(
                err,
                DecodeError::InvalidCharacter { char: bad, position },
                "{:?}",
                barcode
            );
            }
        }
    }
}

#[test]
fn test_valid_secondaries_decode() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let batch = random_batch(&mut rng);
        let link = pick(&mut rng, ALPHANUMERIC);
        let barcode = with_check(&format!("+{}{}", batch.body, link));

        let record = decode(&barcode).unwrap_or_else(|e| panic!("{}: {}", barcode, e));
        assert_eq!(record.kind(), BarcodeKind::Secondary);
        let (year, month, day) = batch.date;
        assert_eq!(
            record.expiration_date(),
            chrono::NaiveDate::from_ymd_opt(2000 + year, month, day)
        );
        assert_eq!(record.quantity(), batch.quantity);
        assert_eq!(record.lot(), (!batch.lot.is_empty()).then_some(batch.lot.as_str()));
        assert_eq!(record.link_character(), Some(link));
    }
}

#[test]
fn test_symbols_in_lot_are_malformed() {
    let mut rng = rng();
    let symbols: Vec<char> = hibc::alphabet::SYMBOLS
        .iter()
        .copied()
        .filter(|c| !c.is_ascii_alphanumeric())
        .collect();
    for _ in 0..ROUNDS {
        let mut batch = random_batch(&mut rng);
        let at = rng.random_range(0..=batch.lot.len());
        let symbol = *symbols.choose(&mut rng).unwrap();
        let lot_start = batch.body.len() - batch.lot.len();
        batch.body.insert(lot_start + at, symbol);
        let link = pick(&mut rng, ALPHANUMERIC);

        for barcode in [
            with_check(&format!("+{}{}", batch.body, link)),
            with_check(&format!("+A12350001/{}", batch.body)),
        ] {
            let err = decode(&barcode).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedSegment, "{}", barcode);
        }
    }
}

#[test]
fn test_random_input_never_panics() {
    let mut rng = rng();
    let mut pool: Vec<char> = hibc::alphabet::SYMBOLS.to_vec();
    pool.extend_from_slice(OUTSIDE_SET);
    pool.push('*');

    for _ in 0..ROUNDS * 5 {
        let len = rng.random_range(0..40);
        let mut barcode: String = (0..len).map(|_| *pool.choose(&mut rng).unwrap()).collect();
        if rng.random_bool(0.7) {
            barcode.insert(0, '+');
        }
        let _ = decode(&barcode);
    }
}
