//! Current-temperature anomaly checking.
//!
//! Compares a freshly observed temperature against the city's seasonal
//! ±2σ band for the season of the reference month. The outcome is
//! three-valued: when the city has no rows for the current season, or the
//! season has too few observations to define a band, the check is
//! `Indeterminate` — never silently coerced to "normal" or "anomalous".
//!
//! # Clock injection
//! `check_temperature_at` accepts the reference month instead of reading
//! the wall clock, so every verdict is deterministic in tests. Use
//! `check_temperature` when the real current month is wanted.

use chrono::{Datelike, Utc};

use crate::analysis::features::OUTLIER_SIGMA;
use crate::model::AugmentedObservation;
use crate::season::{InvalidMonth, Season};

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Outcome of an anomaly check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureVerdict {
    /// Within two standard deviations of the seasonal mean.
    Normal,
    /// More than two standard deviations from the seasonal mean.
    Anomalous,
    /// No usable band: the city has no rows for the current season, or
    /// the season has fewer than 2 observations.
    Indeterminate,
}

impl TemperatureVerdict {
    /// `Some(true)`/`Some(false)` for decided verdicts, `None` otherwise.
    /// Convenience for callers that want the original boolean shape but
    /// must still face the indeterminate case explicitly.
    pub fn is_normal(&self) -> Option<bool> {
        match self {
            TemperatureVerdict::Normal => Some(true),
            TemperatureVerdict::Anomalous => Some(false),
            TemperatureVerdict::Indeterminate => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// Checks a current temperature against the seasonal band for `month`.
///
/// `augmented` is one city's feature-augmented history. The month is used
/// only to select the season; it is the sole use of "now" in the check.
/// Returns `Err` only for an out-of-range month.
pub fn check_temperature_at(
    augmented: &[AugmentedObservation],
    current_temperature: f64,
    month: u32,
) -> Result<TemperatureVerdict, InvalidMonth> {
    let current_season = Season::from_month(month)?;

    // seasonal_mean/std are group aggregates, constant across the season's
    // rows, so the first matching row carries the whole band.
    let row = match augmented.iter().find(|r| r.season == current_season) {
        Some(row) => row,
        None => return Ok(TemperatureVerdict::Indeterminate),
    };

    let (mean, std) = match (row.seasonal_mean, row.seasonal_std) {
        (Some(mean), Some(std)) => (mean, std),
        _ => return Ok(TemperatureVerdict::Indeterminate),
    };

    if (current_temperature - mean).abs() <= OUTLIER_SIGMA * std {
        Ok(TemperatureVerdict::Normal)
    } else {
        Ok(TemperatureVerdict::Anomalous)
    }
}

/// Convenience wrapper that uses the real current month.
/// Use `check_temperature_at` in tests to keep them deterministic.
pub fn check_temperature(
    augmented: &[AugmentedObservation],
    current_temperature: f64,
) -> TemperatureVerdict {
    // Utc::now().month() is always 1-12, so the error arm is unreachable.
    check_temperature_at(augmented, current_temperature, Utc::now().month())
        .unwrap_or(TemperatureVerdict::Indeterminate)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::add_features;
    use crate::model::Observation;
    use chrono::TimeZone;

    fn obs(month: u32, day: u32, temperature: f64) -> Observation {
        Observation {
            city: "Tallinn".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0).unwrap(),
            temperature,
            season: Season::from_month(month).unwrap(),
        }
    }

    #[test]
    fn test_normal_within_band() {
        // Winter temps 0 and 4: mean 2, sample std sqrt(8) ≈ 2.828,
        // band half-width 2σ ≈ 5.657.
        let augmented = add_features(&[obs(1, 1, 0.0), obs(1, 2, 4.0)]);

        assert_eq!(
            check_temperature_at(&augmented, 5.0, 1).unwrap(),
            TemperatureVerdict::Normal
        );
        assert_eq!(
            check_temperature_at(&augmented, -3.0, 12).unwrap(),
            TemperatureVerdict::Normal
        );
    }

    #[test]
    fn test_anomalous_outside_band() {
        let augmented = add_features(&[obs(1, 1, 0.0), obs(1, 2, 4.0)]);

        // |10 - 2| = 8 > 2 * 2.828 ≈ 5.657.
        assert_eq!(
            check_temperature_at(&augmented, 10.0, 1).unwrap(),
            TemperatureVerdict::Anomalous
        );
    }

    #[test]
    fn test_no_rows_for_season_is_indeterminate() {
        // Only winter data; asking about July.
        let augmented = add_features(&[obs(1, 1, 0.0), obs(1, 2, 4.0)]);

        assert_eq!(
            check_temperature_at(&augmented, 20.0, 7).unwrap(),
            TemperatureVerdict::Indeterminate
        );
    }

    #[test]
    fn test_single_row_season_is_indeterminate() {
        // One spring row: mean defined, std undefined, no band.
        let augmented = add_features(&[obs(1, 1, 0.0), obs(1, 2, 4.0), obs(4, 1, 12.0)]);

        assert_eq!(
            check_temperature_at(&augmented, 12.0, 4).unwrap(),
            TemperatureVerdict::Indeterminate
        );
    }

    #[test]
    fn test_invalid_month_is_an_error() {
        let augmented = add_features(&[obs(1, 1, 0.0), obs(1, 2, 4.0)]);
        assert!(check_temperature_at(&augmented, 0.0, 13).is_err());
    }

    #[test]
    fn test_is_normal_projection() {
        assert_eq!(TemperatureVerdict::Normal.is_normal(), Some(true));
        assert_eq!(TemperatureVerdict::Anomalous.is_normal(), Some(false));
        assert_eq!(TemperatureVerdict::Indeterminate.is_normal(), None);
    }
}
