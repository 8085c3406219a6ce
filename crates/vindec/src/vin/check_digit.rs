//! ISO 3779 check-digit computation.
//!
//! Position 9 of a North American VIN is a checksum over the other sixteen
//! characters: each character is transliterated to a number, multiplied by a
//! positional weight, and the sum is taken modulo 11 (`10` is written `X`).
//!
//! The decoder never uses this to decide validity. A VIN with a wrong check
//! digit still decodes as valid; callers that care ask for a
//! [`CheckDigitStatus`] explicitly.

use serde::Serialize;

use super::Vin;

/// Positional weights, position 9 (the check digit itself) weighs zero.
const WEIGHTS: [u32; 17] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Outcome of checking position 9 against the computed check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CheckDigitStatus {
    /// Position 9 holds the expected check digit.
    Match,
    /// Position 9 differs from the computed check digit.
    Mismatch {
        /// What the check digit should have been.
        expected: char,
        /// What position 9 actually holds.
        found: char,
    },
}

impl CheckDigitStatus {
    /// Check the given VIN.
    #[must_use]
    pub fn of(vin: &Vin) -> Self {
        let expected = compute(vin);
        let found = vin.check_char();
        if expected == found {
            Self::Match
        } else {
            Self::Mismatch { expected, found }
        }
    }

    /// Whether the check digit matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Numeric value of a VIN character.
fn transliterate(c: char) -> u32 {
    match c {
        '0'..='9' => c.to_digit(10).unwrap_or(0),
        'A' | 'J' => 1,
        'B' | 'K' | 'S' => 2,
        'C' | 'L' | 'T' => 3,
        'D' | 'M' | 'U' => 4,
        'E' | 'N' | 'V' => 5,
        'F' | 'W' => 6,
        'G' | 'P' | 'X' => 7,
        'H' | 'Y' => 8,
        'R' | 'Z' => 9,
        _ => 0,
    }
}

/// Compute the check digit a VIN should carry at position 9.
#[must_use]
pub fn compute(vin: &Vin) -> char {
    let sum: u32 = vin
        .as_str()
        .chars()
        .zip(WEIGHTS)
        .map(|(c, w)| transliterate(c) * w)
        .sum();

    match sum % 11 {
        10 => 'X',
        r => char::from_digit(r, 10).unwrap_or('X'),
    }
}

/// Whether position 9 holds the computed check digit.
#[must_use]
pub fn verify(vin: &Vin) -> bool {
    compute(vin) == vin.check_char()
}
