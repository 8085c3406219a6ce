//! The VIN decode entry points.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::engine::engine_family;
use super::model::infer_model;
use super::wmi::{country_from_wmi, manufacturer_from_wmi, Country, Manufacturer};
use super::year::model_year;
use super::{disallowed_regex, Vin};

/// Summary returned by [`describe`] for anything that is not a valid VIN.
pub const INVALID_VIN_MESSAGE: &str = "Invalid VIN format";

/// Summary returned by [`describe`] when a valid VIN has nothing to show.
pub const EMPTY_DECODE_MESSAGE: &str = "VIN decoded successfully";

/// Result of decoding a VIN.
///
/// When `is_valid` is false every other field is `None`. When it is true,
/// any field may still be `None`: an unrecognized manufacturer or year code
/// is a valid-but-unrecognized VIN, not a failure.
///
/// `model` comes from a heuristic and `engine_type` is a manufacturer-level
/// estimate; neither is an authoritative decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedVin {
    /// Whether the input was a well-formed VIN.
    pub is_valid: bool,

    /// Manufacturer from the WMI table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Manufacturer>,

    /// Best-effort model guess from the VDS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Model year from position 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_year: Option<u16>,

    /// Region of manufacture from the first WMI character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,

    /// Raw position-9 character. Not verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_digit: Option<char>,

    /// Engine family typical for the manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
}

impl DecodedVin {
    /// The result for malformed input.
    #[must_use]
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Decode an already validated VIN.
    #[must_use]
    pub fn from_vin(vin: &Vin) -> Self {
        let wmi = vin.wmi();
        let vds = vin.vds();
        let manufacturer = manufacturer_from_wmi(wmi);

        Self {
            is_valid: true,
            manufacturer,
            model: manufacturer
                .and_then(|m| infer_model(m, vds))
                .map(|guess| guess.model.to_string()),
            model_year: model_year(vin.year_code()),
            country: Some(country_from_wmi(wmi)),
            check_digit: Some(vin.check_char()),
            engine_type: manufacturer.map(|m| engine_family(m).to_string()),
        }
    }

    /// Whether the decode recognized the manufacturer.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.manufacturer.is_some()
    }
}

impl fmt::Display for DecodedVin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe(self))
    }
}

/// Decode a VIN.
///
/// Never fails: input that is empty, not 17 characters long, or contains a
/// character outside `[A-HJ-NPR-Z0-9]` (case-insensitive) yields
/// [`DecodedVin::invalid`].
#[must_use]
pub fn decode(vin: &str) -> DecodedVin {
    match Vin::parse(vin) {
        Ok(vin) => {
            let decoded = DecodedVin::from_vin(&vin);
            trace!(
                vin = %vin,
                manufacturer = ?decoded.manufacturer,
                model_year = ?decoded.model_year,
                "Decoded VIN"
            );
            decoded
        }
        Err(e) => {
            trace!(error = %e, "Rejected VIN");
            DecodedVin::invalid()
        }
    }
}

/// Whether the input is a well-formed VIN.
#[must_use]
pub fn is_valid_format(vin: &str) -> bool {
    Vin::parse(vin).is_ok()
}

/// Uppercase the input and drop every character outside the VIN alphabet.
///
/// The result is not guaranteed to be 17 characters long.
#[must_use]
pub fn normalize(vin: &str) -> String {
    let upper = vin.to_ascii_uppercase();
    disallowed_regex().replace_all(&upper, "").into_owned()
}

/// One-line human-readable summary of a decode.
#[must_use]
pub fn describe(decoded: &DecodedVin) -> String {
    if !decoded.is_valid {
        return INVALID_VIN_MESSAGE.to_string();
    }

    let mut parts = Vec::new();
    if let Some(manufacturer) = decoded.manufacturer {
        parts.push(format!("Manufacturer: {manufacturer}"));
    }
    if let Some(model) = &decoded.model {
        parts.push(format!("Model: {model}"));
    }
    if let Some(year) = decoded.model_year {
        parts.push(format!("Year: {year}"));
    }
    if let Some(country) = decoded.country {
        parts.push(format!("Country: {country}"));
    }

    if parts.is_empty() {
        EMPTY_DECODE_MESSAGE.to_string()
    } else {
        parts.join(", ")
    }
}
