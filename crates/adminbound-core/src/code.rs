// crates/adminbound-core/src/code.rs
//! Administrative codes and levels.
//!
//! A code is six ASCII digits: two for the province, two for the prefecture,
//! two for the county. Municipalities (`110000`, `310000`, ...) zero out the
//! lower four digits, so their children only share the two-digit province
//! prefix.

/// Canonical length of an administrative code.
pub const CODE_LEN: usize = 6;

/// Marker the boundary service uses for the envelope polygon of a download.
/// It is not administrative territory.
pub const EXTENT_SENTINEL: &str = "fanwei";

/// Length of the country prefix on mapping-service codes (`156` for China).
pub const COUNTRY_PREFIX_LEN: usize = 3;

/// `true` when `code` has the canonical shape (six characters).
#[inline]
pub fn is_canonical(code: &str) -> bool {
    code.len() == CODE_LEN
}

/// `true` when characters 3–6 of `code` are all `'0'`.
#[inline]
pub fn is_municipality(code: &str) -> bool {
    code.len() == CODE_LEN && code.as_bytes()[2..].iter().all(|b| *b == b'0')
}

/// Number of leading characters a child code must share with `unit_code`.
#[inline]
pub fn prefix_len(unit_code: &str) -> usize {
    if is_municipality(unit_code) {
        2
    } else {
        4
    }
}

/// Compares the first `len` bytes of both codes. Shorter inputs never match.
#[inline]
pub fn shares_prefix(a: &str, b: &str, len: usize) -> bool {
    match (a.as_bytes().get(..len), b.as_bytes().get(..len)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Strips the country prefix from a mapping-service code (`156420800` → `420800`).
///
/// Codes shorter than the prefix come back empty.
pub fn strip_country_prefix(raw: &str) -> &str {
    raw.get(COUNTRY_PREFIX_LEN..).unwrap_or("")
}

/// Administrative level of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminLevel {
    Province,
    City,
    County,
}

impl AdminLevel {
    /// Parses the mapping service's `adminType` field.
    pub fn from_admin_type(s: &str) -> Option<Self> {
        match s {
            "province" => Some(AdminLevel::Province),
            "city" => Some(AdminLevel::City),
            "county" => Some(AdminLevel::County),
            _ => None,
        }
    }

    /// Category label written on flattened features.
    pub fn label(&self) -> &'static str {
        match self {
            AdminLevel::Province => "province",
            AdminLevel::City => "prefecture",
            AdminLevel::County => "county",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn municipality_codes_use_short_prefix() {
        assert!(is_municipality("110000"));
        assert_eq!(prefix_len("110000"), 2);
        assert!(!is_municipality("420800"));
        assert_eq!(prefix_len("420800"), 4);
        // a province code looks like a municipality; the rule is purely textual
        assert_eq!(prefix_len("420000"), 2);
    }

    #[test]
    fn short_codes_are_not_municipalities() {
        assert!(!is_municipality("1100"));
        assert_eq!(prefix_len(""), 4);
    }

    #[test]
    fn prefix_comparison_is_bounded() {
        assert!(shares_prefix("420802", "420800", 4));
        assert!(!shares_prefix("420902", "420800", 4));
        assert!(!shares_prefix("42", "420800", 4));
    }

    #[test]
    fn country_prefix_is_stripped() {
        assert_eq!(strip_country_prefix("156420800"), "420800");
        assert_eq!(strip_country_prefix("15"), "");
    }

    #[test]
    fn admin_type_labels() {
        assert_eq!(
            AdminLevel::from_admin_type("city").map(|l| l.label()),
            Some("prefecture")
        );
        assert_eq!(AdminLevel::from_admin_type("district"), None);
    }
}
