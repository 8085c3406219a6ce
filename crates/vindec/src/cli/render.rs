//! Output rendering for CLI commands.

use std::fmt::Write as _;

use serde::Serialize;

use super::OutputFormat;
use crate::error::Result;
use crate::truck::Truck;
use crate::vin::{decode, CheckDigitStatus, DecodedVin, Vin};

/// Placeholder for absent table cells.
const EMPTY_CELL: &str = "-";

/// One decoded input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeRecord {
    /// The input exactly as given.
    pub input: String,
    /// The decode result.
    #[serde(flatten)]
    pub decoded: DecodedVin,
    /// Check-digit verification, when requested and the VIN is well-formed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_digit_status: Option<CheckDigitStatus>,
}

impl DecodeRecord {
    /// Decode `input`, optionally verifying its check digit.
    #[must_use]
    pub fn new(input: &str, check_digit: bool) -> Self {
        let check_digit_status = if check_digit {
            Vin::parse(input).ok().map(|vin| CheckDigitStatus::of(&vin))
        } else {
            None
        };

        Self {
            input: input.to_string(),
            decoded: decode(input),
            check_digit_status,
        }
    }
}

/// VINs listed in batch input: one per line, blank lines and `#` comments
/// skipped, surrounding whitespace trimmed.
#[must_use]
pub fn batch_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn check_digit_cell(status: Option<CheckDigitStatus>) -> String {
    match status {
        Some(CheckDigitStatus::Match) => "ok".to_string(),
        Some(CheckDigitStatus::Mismatch { expected, .. }) => format!("expected {expected}"),
        None => EMPTY_CELL.to_string(),
    }
}

/// Render decode records in the given format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_records(records: &[DecodeRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_records_plain(records)),
        OutputFormat::Table => Ok(render_records_table(records)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
    }
}

fn render_records_plain(records: &[DecodeRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.input);
        out.push_str(": ");
        out.push_str(&record.decoded.to_string());
        if let Some(status) = record.check_digit_status {
            out.push_str(" [check digit: ");
            out.push_str(&check_digit_cell(Some(status)));
            out.push(']');
        }
        out.push('\n');
    }
    out
}

fn render_records_table(records: &[DecodeRecord]) -> String {
    let header = [
        "VIN",
        "VALID",
        "MANUFACTURER",
        "MODEL",
        "YEAR",
        "COUNTRY",
        "CHECK",
        "ENGINE",
    ];

    let rows: Vec<[String; 8]> = records
        .iter()
        .map(|r| {
            let d = &r.decoded;
            let cell = |v: Option<String>| v.unwrap_or_else(|| EMPTY_CELL.to_string());
            [
                r.input.clone(),
                if d.is_valid { "yes" } else { "no" }.to_string(),
                cell(d.manufacturer.map(|m| m.display_name().to_string())),
                cell(d.model.clone()),
                cell(d.model_year.map(|y| y.to_string())),
                cell(d.country.map(|c| c.to_string())),
                check_digit_cell(r.check_digit_status),
                cell(d.engine_type.clone()),
            ]
        })
        .collect();

    table(&header, &rows)
}

/// Render trucks in the given format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_trucks(trucks: &[&Truck], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(trucks)?),
        OutputFormat::Plain => {
            let mut out = String::new();
            for truck in trucks {
                let unit = truck.unit_number.as_deref().unwrap_or(EMPTY_CELL);
                let manufacturer = truck
                    .manufacturer
                    .map_or(EMPTY_CELL, |m| m.display_name());
                let model = truck.model.as_deref().unwrap_or(EMPTY_CELL);
                let _ = writeln!(out, "{} (unit {unit}): {manufacturer} {model}", truck.vin);
            }
            Ok(out)
        }
        OutputFormat::Table => {
            let header = ["VIN", "UNIT", "MANUFACTURER", "MODEL", "YEAR", "ENGINE NO."];
            let rows: Vec<[String; 6]> = trucks
                .iter()
                .map(|t| {
                    [
                        t.vin.clone(),
                        t.unit_number.clone().unwrap_or_else(|| EMPTY_CELL.to_string()),
                        t.manufacturer
                            .map_or(EMPTY_CELL, |m| m.display_name())
                            .to_string(),
                        t.model.clone().unwrap_or_else(|| EMPTY_CELL.to_string()),
                        t.model_year
                            .map_or_else(|| EMPTY_CELL.to_string(), |y| y.to_string()),
                        t.engine_number
                            .clone()
                            .unwrap_or_else(|| EMPTY_CELL.to_string()),
                    ]
                })
                .collect();
            Ok(table(&header, &rows))
        }
    }
}

/// Left-aligned columns separated by two spaces.
fn table<const N: usize>(header: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(header.to_vec());
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const KENWORTH_VIN: &str = "1XKDP4TX0KJ123456";

    #[test]
    fn test_batch_lines() {
        let text = "# fleet A\n1XKDP4TX0KJ123456\n\n   4V4NC9EH5FN123456  \n#done\n";
        assert_eq!(
            batch_lines(text),
            vec!["1XKDP4TX0KJ123456", "4V4NC9EH5FN123456"]
        );
        assert!(batch_lines("").is_empty());
    }

    #[test]
    fn test_record_without_check_digit() {
        let record = DecodeRecord::new(KENWORTH_VIN, false);
        assert!(record.decoded.is_valid);
        assert!(record.check_digit_status.is_none());
    }

    #[test]
    fn test_record_check_digit_on_invalid_input() {
        let record = DecodeRecord::new("bad", true);
        assert!(!record.decoded.is_valid);
        assert!(record.check_digit_status.is_none());
    }

    #[test]
    fn test_render_plain() {
        let records = vec![
            DecodeRecord::new(KENWORTH_VIN, true),
            DecodeRecord::new("bad", false),
        ];
        let out = render_records(&records, OutputFormat::Plain).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "1XKDP4TX0KJ123456: Manufacturer: KENWORTH, Model: T680, Year: 2019, \
             Country: United States [check digit: ok]"
        );
        assert_eq!(lines[1], "bad: Invalid VIN format");
    }

    #[test]
    fn test_render_plain_mismatch() {
        let records = vec![DecodeRecord::new("1FUJGLDR5CSBM1234", true)];
        let out = render_records(&records, OutputFormat::Plain).unwrap();
        assert!(out.contains("[check digit: expected 6]"));
    }

    #[test]
    fn test_render_json() {
        let records = vec![DecodeRecord::new(KENWORTH_VIN, true)];
        let out = render_records(&records, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["input"], KENWORTH_VIN);
        assert_eq!(value[0]["isValid"], true);
        assert_eq!(value[0]["manufacturer"], "KENWORTH");
        assert_eq!(value[0]["checkDigitStatus"]["status"], "match");
    }

    #[test]
    fn test_render_json_invalid() {
        let records = vec![DecodeRecord::new("bad", false)];
        let out = render_records(&records, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["isValid"], false);
        assert!(value[0].get("manufacturer").is_none());
    }

    #[test]
    fn test_render_table() {
        let records = vec![
            DecodeRecord::new(KENWORTH_VIN, false),
            DecodeRecord::new("999DP4TX0ZJ123456", false),
        ];
        let out = render_records(&records, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("VIN"));
        assert!(lines[1].contains("Kenworth"));
        assert!(lines[1].contains("PACCAR MX / Cummins"));
        assert!(lines[2].contains("Unknown"));
        // Columns line up under their headers.
        let col = lines[0].find("VALID").unwrap();
        assert_eq!(&lines[1][col..col + 3], "yes");
        assert_eq!(&lines[2][col..col + 3], "yes");
    }

    #[test]
    fn test_render_trucks() {
        let truck = Truck {
            model: Some("T680".to_string()),
            unit_number: Some("17".to_string()),
            manufacturer: Some(crate::vin::Manufacturer::Kenworth),
            ..Truck::new(KENWORTH_VIN)
        };
        let trucks = vec![&truck];

        let plain = render_trucks(&trucks, OutputFormat::Plain).unwrap();
        assert_eq!(plain, "1XKDP4TX0KJ123456 (unit 17): Kenworth T680\n");

        let table = render_trucks(&trucks, OutputFormat::Table).unwrap();
        assert!(table.lines().nth(1).unwrap().contains("Kenworth"));

        let json = render_trucks(&trucks, OutputFormat::Json).unwrap();
        assert!(json.contains("\"unitNumber\": \"17\""));
    }

    #[test]
    fn test_render_trucks_missing_fields() {
        let truck = Truck::new(KENWORTH_VIN);
        let trucks = vec![&truck];

        let plain = render_trucks(&trucks, OutputFormat::Plain).unwrap();
        assert_eq!(plain, "1XKDP4TX0KJ123456 (unit -): - -\n");

        let table = render_trucks(&trucks, OutputFormat::Table).unwrap();
        let row = table.lines().nth(1).unwrap();
        assert!(row.starts_with(KENWORTH_VIN));
        assert!(row.ends_with('-'));
    }
}
