//! Calendar season mapping.
//!
//! Seasons are meteorological, not astronomical: December–February is
//! winter, and so on in three-month blocks. The mapping is the single
//! source of truth for the `season` column — it is always derived from a
//! timestamp's month, never read from input data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four meteorological seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Maps a calendar month (1–12) to its season.
    ///
    /// Fixed mapping: {12,1,2}→Winter, {3,4,5}→Spring, {6,7,8}→Summer,
    /// {9,10,11}→Autumn. Any month outside 1–12 is an `InvalidMonth` error.
    pub fn from_month(month: u32) -> Result<Season, InvalidMonth> {
        match month {
            12 | 1 | 2 => Ok(Season::Winter),
            3..=5 => Ok(Season::Spring),
            6..=8 => Ok(Season::Summer),
            9..=11 => Ok(Season::Autumn),
            other => Err(InvalidMonth(other)),
        }
    }

    /// Lowercase label as it appears in summaries and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A month value outside 1–12.
///
/// Should not occur for wall-clock input, but the mapping is defined over
/// arbitrary integers so the failure mode has to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonth(pub u32);

impl fmt::Display for InvalidMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid month: {} (expected 1-12)", self.0)
    }
}

impl std::error::Error for InvalidMonth {}
