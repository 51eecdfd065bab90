//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed column/row coordinates.
//!
//! # Examples
//!
//! ```
//! use gridsheet_engine::engine::CellRef;
//!
//! let cell = CellRef::parse_a1("B3").unwrap();
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::error::{EngineError, Result};

/// A reference to a cell by column and row indices (0-indexed).
///
/// Identity is the `(col, row)` pair only. A textual reference supplied through
/// [`CellRef::with_reference`] is kept for display but never takes part in
/// equality or hashing.
#[derive(Clone, Debug)]
pub struct CellRef {
    pub col: usize,
    pub row: usize,
    reference: Option<String>,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef {
            col,
            row,
            reference: None,
        }
    }

    /// Create a cell reference that remembers the text it was written as.
    ///
    /// The text must be upper-case letters followed by a row number without
    /// leading zeros (`A1`, `AB56`); anything else is rejected.
    pub fn with_reference(col: usize, row: usize, reference: &str) -> Result<CellRef> {
        if !strict_ref_re().is_match(reference) {
            return Err(EngineError::InvalidReferenceFormat(reference.to_string()));
        }
        Ok(CellRef {
            col,
            row,
            reference: Some(reference.to_string()),
        })
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "b2", "AA10").
    /// Returns None if the input is invalid or the row is zero.
    pub fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        let col = CellRef::letters_to_col(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// The textual reference: the one supplied at construction, or the derived one.
    pub fn to_reference(&self) -> String {
        match &self.reference {
            Some(reference) => reference.clone(),
            None => format!("{}{}", CellRef::col_to_letters(self.col), self.row + 1),
        }
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// Like [`CellRef::col_to_letters`] for callers holding a signed index.
    pub fn try_col_to_letters(col: i64) -> Result<String> {
        let col = usize::try_from(col).map_err(|_| EngineError::NegativeColumn(col))?;
        Ok(CellRef::col_to_letters(col))
    }

    /// Convert spreadsheet-style letters back to a column index (A -> 0, AA -> 26).
    /// Case-insensitive. Returns None for empty input, non-letters, or overflow.
    pub fn letters_to_col(letters: &str) -> Option<usize> {
        if letters.is_empty() {
            return None;
        }
        let mut acc = 0usize;
        for c in letters.bytes() {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            let digit = (c.to_ascii_uppercase() - b'A') as usize + 1;
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        acc.checked_sub(1)
    }
}

impl PartialEq for CellRef {
    fn eq(&self, other: &Self) -> bool {
        self.col == other.col && self.row == other.row
    }
}

impl Eq for CellRef {}

impl Hash for CellRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.col.hash(state);
        self.row.hash(state);
    }
}

impl std::str::FromStr for CellRef {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        CellRef::parse_a1(s).ok_or_else(|| EngineError::InvalidReferenceFormat(s.to_string()))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            Some(reference) => f.write_str(reference),
            None => write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1),
        }
    }
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("cell reference regex must compile")
    })
}

fn strict_ref_re() -> &'static Regex {
    static STRICT_RE: OnceLock<Regex> = OnceLock::new();
    STRICT_RE.get_or_init(|| {
        Regex::new(r"^[A-Z]+[1-9][0-9]*$").expect("strict reference regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::CellRef;
    use crate::error::EngineError;
    use std::collections::HashSet;

    #[test]
    fn test_parse_a1_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::parse_a1(&huge).is_none());
    }

    #[test]
    fn test_col_to_letters_handles_max_usize() {
        let letters = CellRef::col_to_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_col_to_letters_known_values() {
        assert_eq!(CellRef::col_to_letters(0), "A");
        assert_eq!(CellRef::col_to_letters(25), "Z");
        assert_eq!(CellRef::col_to_letters(26), "AA");
        assert_eq!(CellRef::col_to_letters(51), "AZ");
        assert_eq!(CellRef::col_to_letters(52), "BA");
        assert_eq!(CellRef::col_to_letters(701), "ZZ");
        assert_eq!(CellRef::col_to_letters(702), "AAA");
    }

    #[test]
    fn test_col_letters_bijection() {
        for col in 0..5_000 {
            let letters = CellRef::col_to_letters(col);
            assert_eq!(CellRef::letters_to_col(&letters), Some(col), "column {}", col);
        }
    }

    #[test]
    fn test_try_col_to_letters_rejects_negative() {
        assert_eq!(
            CellRef::try_col_to_letters(-1),
            Err(EngineError::NegativeColumn(-1))
        );
        assert_eq!(CellRef::try_col_to_letters(27).unwrap(), "AB");
    }

    #[test]
    fn test_with_reference_validates_format() {
        let cell = CellRef::with_reference(27, 55, "AB56").unwrap();
        assert_eq!(cell.to_reference(), "AB56");

        for bad in ["", "A0", "a1", "1A", "A01", "A 1", "AB"] {
            assert_eq!(
                CellRef::with_reference(0, 0, bad),
                Err(EngineError::InvalidReferenceFormat(bad.to_string())),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_identity_ignores_textual_form() {
        let derived = CellRef::new(1, 2);
        let supplied = CellRef::with_reference(1, 2, "B3").unwrap();
        assert_eq!(derived, supplied);

        let mut set = HashSet::new();
        set.insert(derived);
        assert!(set.contains(&supplied));
    }

    #[test]
    fn test_to_reference_derives_when_absent() {
        assert_eq!(CellRef::new(0, 0).to_reference(), "A1");
        assert_eq!(CellRef::new(26, 99).to_reference(), "AA100");
    }

    #[test]
    fn test_from_str_reports_invalid_reference() {
        let err = "A0".parse::<CellRef>().unwrap_err();
        assert_eq!(err, EngineError::InvalidReferenceFormat("A0".to_string()));
        assert_eq!("c7".parse::<CellRef>().unwrap(), CellRef::new(2, 6));
    }
}
