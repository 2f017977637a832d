//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use hibc::prelude::*;
//!
//! let record = decode("+A12350001/$$8123250630LOT992").unwrap();
//! let (primary, secondary) = record.split().unwrap();
//! assert!(links_match(&primary, &secondary).unwrap());
//! ```

pub use crate::{
    BarcodeKind,
    BarcodeRecord,
    BatchInfo,

    // Errors
    DecodeError,
    // Configuration
    Decoder,
    DecoderSettings,
    ErrorKind,
    Expiry,
    LinkError,
    ProductIdentity,

    checksum,
    // Entry points
    decode,
    links_match,
};
