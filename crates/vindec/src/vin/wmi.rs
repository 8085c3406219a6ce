//! World Manufacturer Identifier lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heavy-duty truck manufacturers recognized by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Manufacturer {
    /// Kenworth (PACCAR).
    Kenworth,
    /// International (Navistar).
    International,
    /// Volvo Trucks North America.
    Volvo,
    /// Freightliner (Daimler Truck).
    Freightliner,
    /// Peterbilt (PACCAR).
    Peterbilt,
}

impl Manufacturer {
    /// All known manufacturers.
    pub const ALL: [Self; 5] = [
        Self::Kenworth,
        Self::International,
        Self::Volvo,
        Self::Freightliner,
        Self::Peterbilt,
    ];

    /// The stable upper-case code, as serialized.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Kenworth => "KENWORTH",
            Self::International => "INTERNATIONAL",
            Self::Volvo => "VOLVO",
            Self::Freightliner => "FREIGHTLINER",
            Self::Peterbilt => "PETERBILT",
        }
    }

    /// Human-readable brand name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Kenworth => "Kenworth",
            Self::International => "International",
            Self::Volvo => "Volvo",
            Self::Freightliner => "Freightliner",
            Self::Peterbilt => "Peterbilt",
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Region of manufacture, derived from the first WMI character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    /// `1`, `4`, `5`.
    #[serde(rename = "United States")]
    UnitedStates,
    /// `2`.
    Canada,
    /// `3`.
    Mexico,
    /// `J`.
    Japan,
    /// `K`, `L`, `M`, `N`, `P`.
    Asia,
    /// `S` through `Z`.
    Europe,
    /// Anything else.
    Unknown,
}

impl Country {
    /// Region name as shown to users.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UnitedStates => "United States",
            Self::Canada => "Canada",
            Self::Mexico => "Mexico",
            Self::Japan => "Japan",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up the manufacturer for an exact three-character WMI.
///
/// Returns `None` for codes outside the table; an unknown WMI is not an
/// error.
#[must_use]
pub fn manufacturer_from_wmi(wmi: &str) -> Option<Manufacturer> {
    match wmi {
        "1XK" => Some(Manufacturer::Kenworth),
        "1NP" | "1XP" => Some(Manufacturer::Peterbilt),
        "1FU" | "1FV" | "3AK" => Some(Manufacturer::Freightliner),
        "1HT" | "1HS" | "3HM" => Some(Manufacturer::International),
        "4V4" | "4V1" | "4VL" => Some(Manufacturer::Volvo),
        _ => None,
    }
}

/// Classify the region of manufacture from the first WMI character.
#[must_use]
pub fn country_from_wmi(wmi: &str) -> Country {
    match wmi.chars().next() {
        Some('1' | '4' | '5') => Country::UnitedStates,
        Some('2') => Country::Canada,
        Some('3') => Country::Mexico,
        Some('J') => Country::Japan,
        Some('K' | 'L' | 'M' | 'N' | 'P') => Country::Asia,
        Some('S'..='Z') => Country::Europe,
        _ => Country::Unknown,
    }
}
