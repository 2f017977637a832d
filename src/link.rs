use crate::decoders::errors::LinkError;
use crate::record::{BarcodeKind, BarcodeRecord};

/// Checks that a primary and a secondary record come from the same label.
///
/// The primary side is keyed by the check character of its primary data:
/// the stored check character of a Primary record, or the link character
/// derived for a Concatenated one. It must equal the link character carried
/// by the secondary side.
///
/// Records of the wrong kind are rejected rather than compared, so swapping
/// a Primary and a Secondary record is an error, not a mismatch.
///
/// # Example
///
/// ```
/// use hibc::{decode, links_match};
///
/// let primary = decode("+A12350001K").unwrap();
/// let secondary = decode("+$$8123250630LOT99K3").unwrap();
/// assert!(links_match(&primary, &secondary).unwrap());
/// assert!(links_match(&secondary, &primary).is_err());
/// ```
pub fn links_match(primary: &BarcodeRecord, secondary: &BarcodeRecord) -> Result<bool, LinkError> {
    let key = match primary {
        BarcodeRecord::Primary {
            check_character, ..
        } => *check_character,
        BarcodeRecord::Concatenated { link_character, .. } => *link_character,
        BarcodeRecord::Secondary { .. } => {
            return Err(LinkError::InvalidArgumentKind {
                argument: "primary",
                kind: BarcodeKind::Secondary,
            });
        }
    };

    let link = match secondary {
        BarcodeRecord::Secondary { link_character, .. }
        | BarcodeRecord::Concatenated { link_character, .. } => *link_character,
        BarcodeRecord::Primary { .. } => {
            return Err(LinkError::InvalidArgumentKind {
                argument: "secondary",
                kind: BarcodeKind::Primary,
            });
        }
    };

    Ok(key == link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::decode;
    use crate::decoders::errors::ErrorKind;

    #[test]
    fn test_matching_pair() {
        let primary = decode("+A12350001K").unwrap();
        let secondary = decode("+$$8123250630LOT99K3").unwrap();
        assert_eq!(links_match(&primary, &secondary), Ok(true));
    }

    #[test]
    fn test_flipped_link_is_a_mismatch() {
        let primary = decode("+A12350001K").unwrap();
        let secondary = decode("+$$8123250630LOT99L4").unwrap();
        assert_eq!(links_match(&primary, &secondary), Ok(false));
    }

    #[test]
    fn test_concatenated_on_either_side() {
        let concatenated = decode("+A12350001/$$8123250630LOT992").unwrap();
        let primary = decode("+A12350001K").unwrap();
        let secondary = decode("+$$8123250630LOT99K3").unwrap();

        assert_eq!(links_match(&concatenated, &secondary), Ok(true));
        assert_eq!(links_match(&primary, &concatenated), Ok(true));
        assert_eq!(links_match(&concatenated, &concatenated), Ok(true));
    }

    #[test]
    fn test_swapped_arguments_rejected() {
        let primary = decode("+A12350001K").unwrap();
        let secondary = decode("+$$8123250630LOT99K3").unwrap();

        let err = links_match(&secondary, &primary).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentKind);
        assert_eq!(
            err,
            LinkError::InvalidArgumentKind {
                argument: "primary",
                kind: BarcodeKind::Secondary
            }
        );

        let err = links_match(&primary, &primary).unwrap_err();
        assert_eq!(
            err,
            LinkError::InvalidArgumentKind {
                argument: "secondary",
                kind: BarcodeKind::Primary
            }
        );
    }

    #[test]
    fn test_split_halves_link() {
        let concatenated = decode("+A12350001/$$8123250630LOT992").unwrap();
        let (primary, secondary) = concatenated.split().unwrap();
        assert_eq!(primary.check_character(), 'K');
        assert_eq!(links_match(&primary, &secondary), Ok(true));
    }
}
