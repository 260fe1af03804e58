// crates/adminbound-core/src/classify.rs
use crate::code::{is_canonical, prefix_len, shares_prefix, EXTENT_SENTINEL};

/// Where a fragment belongs relative to the unit being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The fragment is part of the unit itself (city-level collection).
    OwnUnit,
    /// The fragment belongs to a child of the unit (county-level collection).
    ChildUnit,
    /// Extent marker, malformed code or outside the unit's footprint.
    Discard,
}

/// Classifies a fragment code against the code of the unit under processing.
///
/// Municipalities (`xx0000`) match children on the first two characters,
/// every other unit on the first four.
///
/// ```
/// use adminbound_core::classify::{classify, Classification};
///
/// assert_eq!(classify("420802", "420800"), Classification::ChildUnit);
/// assert_eq!(classify("110101", "110000"), Classification::ChildUnit);
/// assert_eq!(classify("120101", "110000"), Classification::Discard);
/// assert_eq!(classify("fanwei", "420800"), Classification::Discard);
/// ```
pub fn classify(fragment_code: &str, unit_code: &str) -> Classification {
    if !is_canonical(fragment_code) || fragment_code == EXTENT_SENTINEL {
        return Classification::Discard;
    }
    if !shares_prefix(fragment_code, unit_code, prefix_len(unit_code)) {
        return Classification::Discard;
    }
    if fragment_code == unit_code {
        Classification::OwnUnit
    } else {
        Classification::ChildUnit
    }
}
