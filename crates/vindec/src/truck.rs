//! Truck records and VIN auto-fill.
//!
//! A [`Truck`] mirrors the record kept by the fleet tool, serialized with the
//! same camelCase keys. Keys this crate does not model (failure logs,
//! maintenance history, cost tracking) are carried through untouched.
//!
//! Auto-fill copies decoded VIN fields into a record, but only into fields
//! that are still empty. Anything a user typed is left alone. A key absent
//! from the input stays absent in the output, and numbers keep their JSON
//! representation, so a record auto-fill does not touch round-trips
//! unchanged.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::vin::{decode, DecodedVin, Manufacturer};

/// Kilometres in one mile.
const KM_PER_MILE: f64 = 1.609_34;

/// Engine makers fitted to heavy trucks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineManufacturer {
    /// Cummins.
    Cummins,
    /// Detroit Diesel.
    DetroitDiesel,
    /// PACCAR.
    Paccar,
    /// Volvo.
    Volvo,
    /// Navistar.
    Navistar,
    /// Caterpillar.
    Caterpillar,
}

/// Unit an odometer reading is kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceUnit {
    /// Statute miles.
    #[default]
    Miles,
    /// Kilometres.
    Kilometers,
}

impl DistanceUnit {
    /// Short suffix for display.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Miles => "mi",
            Self::Kilometers => "km",
        }
    }

    /// Convert a distance in this unit to `target`.
    #[must_use]
    pub fn convert(self, distance: f64, target: Self) -> f64 {
        match (self, target) {
            (Self::Miles, Self::Kilometers) => distance * KM_PER_MILE,
            (Self::Kilometers, Self::Miles) => distance / KM_PER_MILE,
            _ => distance,
        }
    }

    /// Format a distance with the given number of decimals.
    #[must_use]
    pub fn format(self, distance: f64, decimals: usize) -> String {
        format!("{distance:.decimals$} {}", self.suffix())
    }
}

/// A truck record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    /// Record identifier; the fleet tool uses the VIN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Truck manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Manufacturer>,

    /// Model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Model year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_year: Option<u16>,

    /// Vehicle Identification Number as entered.
    #[serde(default)]
    pub vin: String,

    /// Engine serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_number: Option<String>,

    /// Engine maker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_manufacturer: Option<EngineManufacturer>,

    /// Engine model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_model: Option<String>,

    /// Odometer reading, as written in the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_reading: Option<Number>,

    /// Unit of `odometer_reading`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_unit: Option<DistanceUnit>,

    /// Engine hours, as written in the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_hours: Option<Number>,

    /// Fleet unit number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,

    /// Owning fleet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_id: Option<String>,

    /// Everything else in the record, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record field written by auto-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AutofillField {
    /// `manufacturer`.
    Manufacturer,
    /// `model`.
    Model,
    /// `modelYear`.
    ModelYear,
}

impl fmt::Display for AutofillField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manufacturer => write!(f, "manufacturer"),
            Self::Model => write!(f, "model"),
            Self::ModelYear => write!(f, "modelYear"),
        }
    }
}

impl Truck {
    /// Create a record for the given VIN with everything else empty.
    #[must_use]
    pub fn new(vin: impl Into<String>) -> Self {
        Self {
            vin: vin.into(),
            ..Self::default()
        }
    }

    /// Decode this record's VIN.
    #[must_use]
    pub fn decode_vin(&self) -> DecodedVin {
        decode(&self.vin)
    }

    /// Copy decoded fields into empty record fields.
    ///
    /// Returns the fields that were written. An invalid decode writes
    /// nothing.
    pub fn autofill(&mut self, decoded: &DecodedVin) -> Vec<AutofillField> {
        let mut filled = Vec::new();
        if !decoded.is_valid {
            return filled;
        }

        if self.manufacturer.is_none() {
            if let Some(manufacturer) = decoded.manufacturer {
                self.manufacturer = Some(manufacturer);
                filled.push(AutofillField::Manufacturer);
            }
        }

        if is_blank(self.model.as_deref()) {
            if let Some(model) = &decoded.model {
                self.model = Some(model.clone());
                filled.push(AutofillField::Model);
            }
        }

        if self.model_year.is_none() {
            if let Some(year) = decoded.model_year {
                self.model_year = Some(year);
                filled.push(AutofillField::ModelYear);
            }
        }

        filled
    }

    /// Odometer reading converted to `unit`. A missing reading is zero.
    #[must_use]
    pub fn odometer_in(&self, unit: DistanceUnit) -> f64 {
        let reading = self
            .odometer_reading
            .as_ref()
            .and_then(Number::as_f64)
            .unwrap_or(0.0);
        self.odometer_unit.unwrap_or_default().convert(reading, unit)
    }

    /// Case-insensitive match against model, VIN, engine number and unit number.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let hit = |s: &str| s.to_lowercase().contains(&term);
        self.model.as_deref().is_some_and(hit)
            || hit(&self.vin)
            || self.engine_number.as_deref().is_some_and(hit)
            || self.unit_number.as_deref().is_some_and(hit)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Auto-fill outcome for one truck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillEntry {
    /// The truck's VIN as stored.
    pub vin: String,
    /// Whether the VIN was well-formed.
    pub vin_valid: bool,
    /// Fields that were written.
    pub filled: Vec<AutofillField>,
}

/// Auto-fill outcome for a fleet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillReport {
    /// One entry per truck, in fleet order.
    pub entries: Vec<AutofillEntry>,
}

impl AutofillReport {
    /// Number of trucks that had at least one field written.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.entries.iter().filter(|e| !e.filled.is_empty()).count()
    }

    /// Number of trucks whose VIN did not decode.
    #[must_use]
    pub fn invalid(&self) -> usize {
        self.entries.iter().filter(|e| !e.vin_valid).count()
    }
}

/// A list of truck records, as kept in a fleet JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fleet {
    /// The trucks, in file order.
    pub trucks: Vec<Truck>,
}

impl Fleet {
    /// Parse a fleet from a JSON array of truck records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a fleet from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of
    /// truck records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let fleet = Self::from_json(&json)?;
        debug!("Loaded {} trucks from {}", fleet.trucks.len(), path.display());
        Ok(fleet)
    }

    /// Serialize the fleet back to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the fleet to a JSON file, with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json(pretty)?;
        std::fs::write(path, json + "\n").map_err(|source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Wrote {} trucks to {}", self.trucks.len(), path.display());
        Ok(())
    }

    /// VINs that appear on more than one truck, compared case-insensitively.
    #[must_use]
    pub fn duplicate_vins(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for truck in &self.trucks {
            let key = truck.vin.trim().to_ascii_uppercase();
            if key.is_empty() {
                continue;
            }
            if !seen.insert(key.clone()) && !duplicates.contains(&key) {
                duplicates.push(key);
            }
        }
        duplicates
    }

    /// Fail if any VIN appears twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateVin`] naming the first repeated VIN.
    pub fn ensure_unique_vins(&self) -> Result<()> {
        match self.duplicate_vins().into_iter().next() {
            Some(vin) => Err(Error::DuplicateVin { vin }),
            None => Ok(()),
        }
    }

    /// Find a truck by VIN, case-insensitively.
    #[must_use]
    pub fn find_by_vin(&self, vin: &str) -> Option<&Truck> {
        let vin = vin.trim();
        self.trucks
            .iter()
            .find(|t| t.vin.trim().eq_ignore_ascii_case(vin))
    }

    /// Trucks matching a search term. An empty term matches everything.
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a Truck> + 'a {
        self.trucks.iter().filter(move |t| t.matches(term))
    }

    /// Decode every truck's VIN and fill empty fields.
    pub fn autofill(&mut self) -> AutofillReport {
        let entries = self
            .trucks
            .iter_mut()
            .map(|truck| {
                let decoded = truck.decode_vin();
                if !decoded.is_valid {
                    warn!(vin = %truck.vin, "Skipping truck with malformed VIN");
                }
                let filled = truck.autofill(&decoded);
                if !filled.is_empty() {
                    debug!(vin = %truck.vin, fields = ?filled, "Auto-filled truck");
                }
                AutofillEntry {
                    vin: truck.vin.clone(),
                    vin_valid: decoded.is_valid,
                    filled,
                }
            })
            .collect();

        AutofillReport { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KENWORTH_VIN: &str = "1XKDP4TX0KJ123456";

    #[test]
    fn test_autofill_empty_record() {
        let mut truck = Truck::new(KENWORTH_VIN);
        let filled = truck.autofill(&decode(KENWORTH_VIN));

        assert_eq!(
            filled,
            vec![
                AutofillField::Manufacturer,
                AutofillField::Model,
                AutofillField::ModelYear
            ]
        );
        assert_eq!(truck.manufacturer, Some(Manufacturer::Kenworth));
        assert_eq!(truck.model.as_deref(), Some("T680"));
        assert_eq!(truck.model_year, Some(2019));
    }

    #[test]
    fn test_autofill_keeps_user_values() {
        let mut truck = Truck {
            manufacturer: Some(Manufacturer::Peterbilt),
            model: Some("T660".to_string()),
            model_year: Some(2015),
            ..Truck::new(KENWORTH_VIN)
        };
        let filled = truck.autofill(&decode(KENWORTH_VIN));

        assert!(filled.is_empty());
        assert_eq!(truck.manufacturer, Some(Manufacturer::Peterbilt));
        assert_eq!(truck.model.as_deref(), Some("T660"));
        assert_eq!(truck.model_year, Some(2015));
    }

    #[test]
    fn test_autofill_whitespace_model_is_empty() {
        let mut truck = Truck {
            model: Some("   ".to_string()),
            ..Truck::new(KENWORTH_VIN)
        };
        let filled = truck.autofill(&decode(KENWORTH_VIN));
        assert!(filled.contains(&AutofillField::Model));
        assert_eq!(truck.model.as_deref(), Some("T680"));
    }

    #[test]
    fn test_autofill_invalid_decode_writes_nothing() {
        let mut truck = Truck::new("bad");
        let filled = truck.autofill(&decode("bad"));
        assert!(filled.is_empty());
        assert_eq!(truck, Truck::new("bad"));
    }

    #[test]
    fn test_autofill_unknown_wmi_only_year() {
        let mut truck = Truck::new("WDB9630421L123456");
        let filled = truck.autofill(&truck.decode_vin());
        assert_eq!(filled, vec![AutofillField::ModelYear]);
        assert!(truck.manufacturer.is_none());
        assert!(truck.model.is_none());
    }

    #[test]
    fn test_distance_conversion() {
        let km = DistanceUnit::Miles.convert(100.0, DistanceUnit::Kilometers);
        assert!((km - 160.934).abs() < 1e-9);

        let miles = DistanceUnit::Kilometers.convert(160.934, DistanceUnit::Miles);
        assert!((miles - 100.0).abs() < 1e-9);

        assert!((DistanceUnit::Miles.convert(42.0, DistanceUnit::Miles) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_format() {
        assert_eq!(DistanceUnit::Miles.format(1234.0, 0), "1234 mi");
        assert_eq!(DistanceUnit::Kilometers.format(12.345, 1), "12.3 km");
    }

    #[test]
    fn test_odometer_defaults_to_miles() {
        let truck = Truck {
            odometer_reading: Some(Number::from(10)),
            ..Truck::new(KENWORTH_VIN)
        };
        let km = truck.odometer_in(DistanceUnit::Kilometers);
        assert!((km - 16.0934).abs() < 1e-9);
    }

    #[test]
    fn test_truck_matches() {
        let truck = Truck {
            model: Some("Cascadia".to_string()),
            engine_number: Some("OM471LA-123".to_string()),
            unit_number: Some("U-42".to_string()),
            ..Truck::new("1FUJGLDR5CSBM1234")
        };
        assert!(truck.matches("cascadia"));
        assert!(truck.matches("1fujg"));
        assert!(truck.matches("om471"));
        assert!(truck.matches("u-42"));
        assert!(truck.matches("  "));
        assert!(!truck.matches("kenworth"));
    }

    #[test]
    fn test_truck_deserialize_fleet_record() {
        let json = r#"{
            "id": "1XKDP4TX0KJ123456",
            "manufacturer": "KENWORTH",
            "model": "T680",
            "vin": "1XKDP4TX0KJ123456",
            "engineNumber": "OM471LA-001",
            "engineManufacturer": "PACCAR",
            "odometerReading": 120000,
            "odometerUnit": "MILES",
            "engineHours": 3100.5,
            "unitNumber": "17",
            "failures": [{"id": "1", "title": "DEF sensor", "description": "", "videoContent": []}]
        }"#;
        let truck: Truck = serde_json::from_str(json).unwrap();

        assert_eq!(truck.manufacturer, Some(Manufacturer::Kenworth));
        assert_eq!(truck.engine_manufacturer, Some(EngineManufacturer::Paccar));
        assert_eq!(truck.odometer_unit, Some(DistanceUnit::Miles));
        assert!(truck.extra.contains_key("failures"));

        let back = serde_json::to_value(&truck).unwrap();
        assert_eq!(back["failures"][0]["title"], "DEF sensor");
        assert_eq!(back["engineNumber"], "OM471LA-001");
        assert!(back["odometerReading"].is_u64());
        assert_eq!(back["odometerReading"], 120_000);
        assert_eq!(back["engineHours"], 3100.5);
        assert_eq!(back, serde_json::from_str::<Value>(json).unwrap());
    }

    #[test]
    fn test_sparse_record_serializes_sparse() {
        let json = serde_json::to_string(&Truck::new("bad")).unwrap();
        assert_eq!(json, r#"{"vin":"bad"}"#);
    }

    #[test]
    fn test_fleet_unfilled_records_round_trip_unchanged() {
        let input = r#"[
            {"vin": "bad", "odometerReading": 120000},
            {"vin": "1XKDP4TX0KJ12345O", "engineHours": 12, "notes": {"tires": [1, 2]}},
            {
                "vin": "1XKDP4TX0KJ123456",
                "manufacturer": "KENWORTH",
                "model": "W900",
                "modelYear": 2018,
                "odometerReading": 5
            }
        ]"#;
        let mut fleet = Fleet::from_json(input).unwrap();

        let report = fleet.autofill();
        assert_eq!(report.updated(), 0);
        assert_eq!(report.invalid(), 2);

        let output: Value = serde_json::from_str(&fleet.to_json(false).unwrap()).unwrap();
        assert_eq!(output, serde_json::from_str::<Value>(input).unwrap());
    }

    #[test]
    fn test_fleet_autofill_adds_only_filled_keys() {
        let mut fleet =
            Fleet::from_json(r#"[{"vin": "1XKDP4TX0KJ123456", "odometerReading": 7}]"#).unwrap();
        fleet.autofill();

        let output: Value = serde_json::from_str(&fleet.to_json(false).unwrap()).unwrap();
        assert_eq!(
            output,
            serde_json::json!([{
                "vin": "1XKDP4TX0KJ123456",
                "manufacturer": "KENWORTH",
                "model": "T680",
                "modelYear": 2019,
                "odometerReading": 7
            }])
        );
    }

    #[test]
    fn test_fleet_duplicates() {
        let fleet = Fleet {
            trucks: vec![
                Truck::new(KENWORTH_VIN),
                Truck::new("1FUJGLDR5CSBM1234"),
                Truck::new(KENWORTH_VIN.to_lowercase()),
                Truck::new(""),
                Truck::new(""),
            ],
        };
        assert_eq!(fleet.duplicate_vins(), vec![KENWORTH_VIN.to_string()]);

        let err = fleet.ensure_unique_vins().unwrap_err();
        assert!(matches!(err, Error::DuplicateVin { .. }));
    }

    #[test]
    fn test_fleet_unique() {
        let fleet = Fleet {
            trucks: vec![Truck::new(KENWORTH_VIN), Truck::new("1FUJGLDR5CSBM1234")],
        };
        assert!(fleet.duplicate_vins().is_empty());
        assert!(fleet.ensure_unique_vins().is_ok());
    }

    #[test]
    fn test_fleet_find_and_search() {
        let fleet = Fleet {
            trucks: vec![
                Truck {
                    model: Some("T680".to_string()),
                    ..Truck::new(KENWORTH_VIN)
                },
                Truck {
                    model: Some("Cascadia".to_string()),
                    ..Truck::new("1FUJGLDR5CSBM1234")
                },
            ],
        };

        let found = fleet.find_by_vin("1xkdp4tx0kj123456").unwrap();
        assert_eq!(found.model.as_deref(), Some("T680"));
        assert!(fleet.find_by_vin("4V4NC9EH5FN123456").is_none());

        assert_eq!(fleet.search("casc").count(), 1);
        assert_eq!(fleet.search("").count(), 2);
    }

    #[test]
    fn test_fleet_autofill_report() {
        let mut fleet = Fleet::from_json(
            r#"[
                {"vin": "1XKDP4TX0KJ123456", "model": ""},
                {"vin": "4V4NC9EH5FN123456", "model": "VNL760", "modelYear": 2016},
                {"vin": "not a vin"}
            ]"#,
        )
        .unwrap();

        let report = fleet.autofill();
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.updated(), 2);
        assert_eq!(report.invalid(), 1);

        assert_eq!(fleet.trucks[0].model.as_deref(), Some("T680"));
        assert_eq!(fleet.trucks[1].model.as_deref(), Some("VNL760"));
        assert_eq!(fleet.trucks[1].model_year, Some(2016));
        assert_eq!(fleet.trucks[1].manufacturer, Some(Manufacturer::Volvo));
        assert_eq!(
            report.entries[1].filled,
            vec![AutofillField::Manufacturer]
        );
    }

    #[test]
    fn test_fleet_from_json_rejects_object() {
        assert!(Fleet::from_json(r#"{"vin": "x"}"#).is_err());
    }

    #[test]
    fn test_fleet_load_missing_file() {
        let err = Fleet::load("/nonexistent/fleet.json").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_fleet_save_and_load() {
        let path = std::env::temp_dir().join(format!("vindec-fleet-{}.json", std::process::id()));
        let fleet = Fleet {
            trucks: vec![Truck::new(KENWORTH_VIN)],
        };
        fleet.save(&path, true).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("]\n"));
        assert_eq!(Fleet::load(&path).unwrap(), fleet);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_fleet_save_to_missing_directory() {
        let fleet = Fleet::default();
        let err = fleet.save("/nonexistent/dir/fleet.json", false).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }

    #[test]
    fn test_fleet_to_json() {
        let fleet = Fleet {
            trucks: vec![Truck::new(KENWORTH_VIN)],
        };
        let json = fleet.to_json(false).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(KENWORTH_VIN));
        assert!(fleet.to_json(true).unwrap().contains('\n'));
    }
}
