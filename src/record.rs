use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// The three recognized HIBC message shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeKind {
    /// Product identity only (line 1)
    Primary,
    /// Date, quantity, lot or serial only (line 2)
    Secondary,
    /// Primary and secondary data in one symbol
    Concatenated,
}

impl BarcodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeKind::Primary => "primary",
            BarcodeKind::Secondary => "secondary",
            BarcodeKind::Concatenated => "concatenated",
        }
    }
}

impl fmt::Display for BarcodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labeler, product number and packaging level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductIdentity {
    /// Labeler Identification Code, always 4 characters
    pub labeler_id_code: String,
    /// Product or catalog number, 1-18 characters
    pub product_number: String,
    /// Packaging level, 0-9
    pub unit_of_measure: u8,
}

/// An expiration date, with the hour when the layout carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Expiry {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
}

impl Expiry {
    /// The expiry as a timestamp; midnight when no hour was encoded.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        self.date.and_hms_opt(u32::from(self.hour.unwrap_or(0)), 0, 0)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hour {
            Some(hour) => write!(f, "{} {:02}:00", self.date, hour),
            None => write!(f, "{}", self.date),
        }
    }
}

/// Supplementary data carried by the secondary segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchInfo {
    pub expiration: Option<Expiry>,
    /// `None` when the label does not encode a quantity
    pub quantity: Option<u32>,
    pub lot: Option<String>,
    pub serial: Option<String>,
}

/// A decoded HIBC barcode.
///
/// Each variant holds only the fields its message shape defines. Check
/// characters stored here always match the data they guard; a mismatch
/// fails the decode instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BarcodeRecord {
    Primary {
        #[serde(flatten)]
        identity: ProductIdentity,
        check_character: char,
    },
    Secondary {
        #[serde(flatten)]
        batch: BatchInfo,
        link_character: char,
        check_character: char,
    },
    Concatenated {
        #[serde(flatten)]
        identity: ProductIdentity,
        #[serde(flatten)]
        batch: BatchInfo,
        /// Check character of the primary portion on its own
        link_character: char,
        /// Check character the secondary portion carries as a separate label
        secondary_check_character: char,
        check_character: char,
    },
}

impl BarcodeRecord {
    pub fn kind(&self) -> BarcodeKind {
        match self {
            BarcodeRecord::Primary { .. } => BarcodeKind::Primary,
            BarcodeRecord::Secondary { .. } => BarcodeKind::Secondary,
            BarcodeRecord::Concatenated { .. } => BarcodeKind::Concatenated,
        }
    }

    pub fn identity(&self) -> Option<&ProductIdentity> {
        match self {
            BarcodeRecord::Primary { identity, .. }
            | BarcodeRecord::Concatenated { identity, .. } => Some(identity),
            BarcodeRecord::Secondary { .. } => None,
        }
    }

    pub fn batch(&self) -> Option<&BatchInfo> {
        match self {
            BarcodeRecord::Secondary { batch, .. }
            | BarcodeRecord::Concatenated { batch, .. } => Some(batch),
            BarcodeRecord::Primary { .. } => None,
        }
    }

    pub fn labeler_id_code(&self) -> Option<&str> {
        self.identity().map(|id| id.labeler_id_code.as_str())
    }

    pub fn product_number(&self) -> Option<&str> {
        self.identity().map(|id| id.product_number.as_str())
    }

    pub fn unit_of_measure(&self) -> Option<u8> {
        self.identity().map(|id| id.unit_of_measure)
    }

    pub fn check_character(&self) -> char {
        match self {
            BarcodeRecord::Primary {
                check_character, ..
            }
            | BarcodeRecord::Secondary {
                check_character, ..
            }
            | BarcodeRecord::Concatenated {
                check_character, ..
            } => *check_character,
        }
    }

    /// The link character; primary-only records have none.
    pub fn link_character(&self) -> Option<char> {
        match self {
            BarcodeRecord::Secondary { link_character, .. }
            | BarcodeRecord::Concatenated { link_character, .. } => Some(*link_character),
            BarcodeRecord::Primary { .. } => None,
        }
    }

    pub fn expiration(&self) -> Option<Expiry> {
        self.batch().and_then(|b| b.expiration)
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration().map(|e| e.date)
    }

    pub fn quantity(&self) -> Option<u32> {
        self.batch().and_then(|b| b.quantity)
    }

    pub fn lot(&self) -> Option<&str> {
        self.batch().and_then(|b| b.lot.as_deref())
    }

    pub fn serial(&self) -> Option<&str> {
        self.batch().and_then(|b| b.serial.as_deref())
    }

    /// Splits a concatenated record into the primary and secondary records
    /// the same data would produce as two separate labels.
    ///
    /// Both halves carry check characters computed over their own
    /// segments, so they satisfy the same invariants as directly decoded
    /// records. Returns `None` for other kinds.
    pub fn split(&self) -> Option<(BarcodeRecord, BarcodeRecord)> {
        let BarcodeRecord::Concatenated {
            identity,
            batch,
            link_character,
            secondary_check_character,
            ..
        } = self
        else {
            return None;
        };

        let primary = BarcodeRecord::Primary {
            identity: identity.clone(),
            check_character: *link_character,
        };
        let secondary = BarcodeRecord::Secondary {
            batch: batch.clone(),
            link_character: *link_character,
            check_character: *secondary_check_character,
        };

        Some((primary, secondary))
    }
}

impl fmt::Display for BarcodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Type: {}", self.kind())?;
        if let Some(identity) = self.identity() {
            writeln!(f, "  Labeler: {}", identity.labeler_id_code)?;
            writeln!(f, "  Product: {}", identity.product_number)?;
            writeln!(f, "  Unit of measure: {}", identity.unit_of_measure)?;
        }
        if let Some(batch) = self.batch() {
            match &batch.expiration {
                Some(expiry) => writeln!(f, "  Expires: {}", expiry)?,
                None => writeln!(f, "  Expires: -")?,
            }
            match batch.quantity {
                Some(quantity) => writeln!(f, "  Quantity: {}", quantity)?,
                None => writeln!(f, "  Quantity: -")?,
            }
            if let Some(lot) = &batch.lot {
                writeln!(f, "  Lot: {}", lot)?;
            }
            if let Some(serial) = &batch.serial {
                writeln!(f, "  Serial: {}", serial)?;
            }
        }
        if let Some(link) = self.link_character() {
            writeln!(f, "  Link: {:?}", link)?;
        }
        write!(f, "  Check: {:?}", self.check_character())
    }
}
