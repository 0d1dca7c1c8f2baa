/// Core data types for the temperature anomaly monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic, no I/O, and no external dependencies beyond chrono —
/// only types and the error enums the rest of the crate reports through.

use chrono::{DateTime, Utc};

use crate::season::Season;

// ---------------------------------------------------------------------------
// Observation types
// ---------------------------------------------------------------------------

/// A single historical temperature measurement for one city.
///
/// Corresponds to one row of the uploaded CSV. The `season` field is
/// derived from the timestamp's month at parse time and is never read
/// from the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub city: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub season: Season,
}

/// An `Observation` extended with derived statistics.
///
/// Produced by `analysis::features::add_features`, one output row per
/// input row with input order preserved.
///
/// `seasonal_mean` and `seasonal_std` are group aggregates over all rows
/// of the same (city, season) pair, broadcast back onto each member row —
/// they are constant within the group, not running statistics. A season
/// with fewer than 2 observations has no sample standard deviation, so
/// `seasonal_std` and `outlier` are `None` for its rows. `None` means
/// "no usable band", never zero, never false.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedObservation {
    pub city: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub season: Season,
    /// Trailing mean over up to the 30 most recent observations
    /// (partial window at the start of the series).
    pub rolling_mean: f64,
    pub seasonal_mean: Option<f64>,
    pub seasonal_std: Option<f64>,
    /// `|temperature - seasonal_mean| > 2 * seasonal_std`, undefined when
    /// the std is undefined.
    pub outlier: Option<bool>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while loading the historical dataset.
#[derive(Debug, PartialEq)]
pub enum CsvError {
    /// The input had no header line at all.
    EmptyInput,
    /// A required column (`city`, `timestamp`, `temperature`) is missing
    /// from the header.
    MissingColumn(&'static str),
    /// A data row could not be parsed. Carries the 1-based line number.
    BadRow { line: usize, reason: String },
    /// The file could not be read.
    Io(String),
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvError::EmptyInput => write!(f, "input is empty (no header line)"),
            CsvError::MissingColumn(col) => write!(f, "missing required column: {}", col),
            CsvError::BadRow { line, reason } => {
                write!(f, "bad row at line {}: {}", line, reason)
            }
            CsvError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for CsvError {}

/// Errors from the remote current-temperature fetch.
///
/// Non-2xx responses are classified: an invalid API key is a configuration
/// problem and is surfaced apart from everything else.
#[derive(Debug)]
pub enum FetchError {
    /// HTTP 401 — the API key was rejected.
    Unauthorized,
    /// Any other non-2xx HTTP response.
    Http(u16),
    /// The response body could not be deserialized into the expected shape.
    Parse(String),
    /// Connection, DNS, or timeout failure before a response arrived.
    Transport(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Unauthorized => {
                write!(f, "invalid API key (HTTP 401) - check your OpenWeather key")
            }
            FetchError::Http(code) => write!(f, "HTTP error: {}", code),
            FetchError::Parse(msg) => write!(f, "parse error: {}", msg),
            FetchError::Transport(msg) => write!(f, "request failed: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}
