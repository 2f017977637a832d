//! Decoder for Health Industry Bar Code (HIBC) strings.
//!
//! Turns the text read from an HIBC label into a typed [`BarcodeRecord`]:
//! product identity for primary data; expiration, quantity, lot and serial
//! for secondary data; or both for a concatenated symbol. Check characters
//! are verified while decoding, and [`links_match`] confirms that separately
//! scanned primary and secondary labels belong together.
//!
//! # Example
//!
//! ```
//! use hibc::{BarcodeKind, decode, links_match};
//!
//! let primary = decode("+A12350001K").unwrap();
//! assert_eq!(primary.kind(), BarcodeKind::Primary);
//! assert_eq!(primary.product_number(), Some("5000"));
//!
//! let secondary = decode("+$$8123250630LOT99K3").unwrap();
//! assert_eq!(secondary.lot(), Some("LOT99"));
//!
//! assert!(links_match(&primary, &secondary).unwrap());
//! ```

mod classify;
mod core;
mod decoders;
mod link;
mod record;

pub mod prelude;

pub use crate::classify::{Decoder, classify, decode};
pub use crate::core::alphabet::{self, checksum};
pub use crate::core::config::{DecoderSettings, SettingsFile, SettingsOverrides};
pub use crate::decoders::{
    DecodeError, ErrorKind, LinkError, Segment, decode_primary, decode_secondary,
};
pub use crate::link::links_match;
pub use crate::record::{BarcodeKind, BarcodeRecord, BatchInfo, Expiry, ProductIdentity};
