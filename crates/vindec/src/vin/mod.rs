//! Vehicle Identification Number decoding.
//!
//! A VIN is 17 characters over `[A-HJ-NPR-Z0-9]`, split into three fixed
//! sections:
//!
//! - **WMI** (positions 1-3): World Manufacturer Identifier.
//! - **VDS** (positions 4-9): Vehicle Descriptor Section, position 9 is the
//!   check digit.
//! - **VIS** (positions 10-17): Vehicle Identifier Section, position 10 is
//!   the model year code.
//!
//! # Example
//!
//! ```
//! use vindec::{decode, Country, Manufacturer};
//!
//! let decoded = decode("1XKDP4TX0KJ123456");
//! assert!(decoded.is_valid);
//! assert_eq!(decoded.manufacturer, Some(Manufacturer::Kenworth));
//! assert_eq!(decoded.country, Some(Country::UnitedStates));
//! assert_eq!(decoded.model_year, Some(2019));
//! ```

pub mod check_digit;
mod decoder;
mod engine;
mod model;
mod wmi;
mod year;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidVinReason, Result};

pub use check_digit::CheckDigitStatus;
pub use decoder::{decode, describe, is_valid_format, normalize, DecodedVin};
pub use engine::engine_family;
pub use model::{infer_model, ModelBasis, ModelGuess};
pub use wmi::{country_from_wmi, manufacturer_from_wmi, Country, Manufacturer};
pub use year::model_year;

/// Number of characters in a VIN.
pub const VIN_LENGTH: usize = 17;

/// A full, well-formed VIN.
const VIN_PATTERN: &str = r"^[A-HJ-NPR-Z0-9]{17}$";

/// A single character outside the VIN alphabet.
const DISALLOWED_PATTERN: &str = r"[^A-HJ-NPR-Z0-9]";

fn vin_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VIN_PATTERN).expect("VIN pattern is valid"))
}

fn disallowed_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DISALLOWED_PATTERN).expect("VIN pattern is valid"))
}

/// A validated, uppercased VIN.
///
/// A `Vin` can only be built from input that passes the format check, so
/// its sections are always available.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vin(String);

impl Vin {
    /// Parse a VIN, uppercasing it first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVin`] if the input is empty, is not exactly
    /// 17 characters long, or contains a character outside `[A-HJ-NPR-Z0-9]`
    /// (`I`, `O` and `Q` are never allowed).
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::invalid_vin(input, InvalidVinReason::Empty));
        }

        let upper = input.to_ascii_uppercase();
        let len = upper.chars().count();
        if len != VIN_LENGTH {
            return Err(Error::invalid_vin(input, InvalidVinReason::Length(len)));
        }

        if !vin_regex().is_match(&upper) {
            let bad = disallowed_regex()
                .find(&upper)
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or('?');
            return Err(Error::invalid_vin(input, InvalidVinReason::Character(bad)));
        }

        Ok(Self(upper))
    }

    /// The full VIN.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// World Manufacturer Identifier, positions 1-3.
    #[must_use]
    pub fn wmi(&self) -> &str {
        &self.0[0..3]
    }

    /// Vehicle Descriptor Section, positions 4-9.
    #[must_use]
    pub fn vds(&self) -> &str {
        &self.0[3..9]
    }

    /// Vehicle Identifier Section, positions 10-17.
    #[must_use]
    pub fn vis(&self) -> &str {
        &self.0[9..]
    }

    /// The character at position 9.
    #[must_use]
    pub fn check_char(&self) -> char {
        char::from(self.0.as_bytes()[8])
    }

    /// The model year code at position 10.
    #[must_use]
    pub fn year_code(&self) -> char {
        char::from(self.0.as_bytes()[9])
    }

    /// Consume the VIN, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Vin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Vin {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Vin> for String {
    fn from(vin: Vin) -> Self {
        vin.0
    }
}

impl AsRef<str> for Vin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
