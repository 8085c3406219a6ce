//! Engine family estimate.

use super::wmi::Manufacturer;

/// The engine family a manufacturer most commonly fits.
///
/// Manufacturer-level only; the VDS is not consulted.
#[must_use]
pub fn engine_family(manufacturer: Manufacturer) -> &'static str {
    match manufacturer {
        // PACCAR builds ship with PACCAR MX or Cummins
        Manufacturer::Kenworth | Manufacturer::Peterbilt => "PACCAR MX / Cummins",
        Manufacturer::Freightliner => "Detroit Diesel",
        Manufacturer::International => "Navistar / Cummins",
        Manufacturer::Volvo => "Volvo D-Series",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_family() {
        assert_eq!(engine_family(Manufacturer::Kenworth), "PACCAR MX / Cummins");
        assert_eq!(engine_family(Manufacturer::Peterbilt), "PACCAR MX / Cummins");
        assert_eq!(engine_family(Manufacturer::Freightliner), "Detroit Diesel");
        assert_eq!(engine_family(Manufacturer::International), "Navistar / Cummins");
        assert_eq!(engine_family(Manufacturer::Volvo), "Volvo D-Series");
    }
}
