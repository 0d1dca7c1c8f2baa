//! Historical weather CSV loading.
//!
//! Parses a delimited file with at least `city`, `timestamp`, and
//! `temperature` columns; extra columns are ignored. Columns are resolved
//! by header name, not position. The `season` of each row is derived from
//! the timestamp's month — a `season` column in the file, if any, is
//! ignored like every other extra column.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::path::Path;

use crate::model::{CsvError, Observation};
use crate::season::Season;

/// Resolved positions of the required columns within a header line.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    city: usize,
    timestamp: usize,
    temperature: usize,
}

fn resolve_columns(header: &str) -> Result<ColumnIndex, CsvError> {
    let names: Vec<&str> = header.split(',').map(|s| s.trim()).collect();

    let find = |name: &'static str| -> Result<usize, CsvError> {
        names
            .iter()
            .position(|&n| n.eq_ignore_ascii_case(name))
            .ok_or(CsvError::MissingColumn(name))
    };

    Ok(ColumnIndex {
        city: find("city")?,
        timestamp: find("timestamp")?,
        temperature: find("temperature")?,
    })
}

/// Parses a timestamp field. Accepts RFC 3339, a naive
/// `YYYY-MM-DD HH:MM[:SS]` date-time, or a bare `YYYY-MM-DD` date
/// (interpreted as midnight UTC).
fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    let field = field.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(field) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(field, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(field, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// Parses CSV text into observations, file order preserved.
///
/// The first line must be a header naming the required columns. Blank
/// lines are skipped; any other malformed row is an error carrying its
/// 1-based line number.
pub fn parse_observations(csv: &str) -> Result<Vec<Observation>, CsvError> {
    let mut lines = csv.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break line,
            None => return Err(CsvError::EmptyInput),
        }
    };
    let columns = resolve_columns(header)?;
    let width = columns.city.max(columns.timestamp).max(columns.temperature) + 1;

    let mut observations = Vec::new();

    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = i + 1;

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < width {
            return Err(CsvError::BadRow {
                line: line_no,
                reason: format!("expected at least {} columns, found {}", width, fields.len()),
            });
        }

        let city = fields[columns.city].trim();
        if city.is_empty() {
            return Err(CsvError::BadRow {
                line: line_no,
                reason: "city is empty".to_string(),
            });
        }

        let timestamp =
            parse_timestamp(fields[columns.timestamp]).ok_or_else(|| CsvError::BadRow {
                line: line_no,
                reason: format!("unparseable timestamp: {:?}", fields[columns.timestamp].trim()),
            })?;

        let temperature: f64 =
            fields[columns.temperature]
                .trim()
                .parse()
                .map_err(|_| CsvError::BadRow {
                    line: line_no,
                    reason: format!(
                        "temperature is not a number: {:?}",
                        fields[columns.temperature].trim()
                    ),
                })?;

        // month() is 1-12 by construction, so this cannot fail.
        let season = Season::from_month(chrono::Datelike::month(&timestamp))
            .map_err(|e| CsvError::BadRow { line: line_no, reason: e.to_string() })?;

        observations.push(Observation {
            city: city.to_string(),
            timestamp,
            temperature,
            season,
        });
    }

    Ok(observations)
}

/// Loads observations from a CSV file on disk.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>, CsvError> {
    let text = std::fs::read_to_string(path).map_err(|e| CsvError::Io(e.to_string()))?;
    parse_observations(&text)
}

/// Distinct city names in order of first appearance.
pub fn list_cities(observations: &[Observation]) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for obs in observations {
        if !cities.iter().any(|c| c == &obs.city) {
            cities.push(obs.city.clone());
        }
    }
    cities
}

/// All of one city's observations, input order preserved.
pub fn observations_for_city(observations: &[Observation], city: &str) -> Vec<Observation> {
    observations.iter().filter(|o| o.city == city).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
